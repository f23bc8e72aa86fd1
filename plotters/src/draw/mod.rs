//! Drawing of the individual figure parts onto a plotters area.

use plotters::{
    coord::Shift,
    prelude::{DrawingArea, DrawingBackend, IntoFont},
    style::{
        text_anchor::{HPos, Pos, VPos},
        Color, FontTransform, RGBColor, TextStyle, WHITE,
    },
};
use sliceplots_core::{FieldSlice, Rgb};
use tracing::{instrument, trace};

use crate::{colors, grid::Panels, stroke::points_to_pixels, Error};

mod colorbar;
mod main_panel;
mod strip;

const FONT_FAMILY: &str = "sans-serif";

/// Text sizes and pixel conversions for one figure resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Style {
    pub dpi: u32,
}

impl Style {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    pub fn px(&self, points: f64) -> f64 {
        points_to_pixels(points, self.dpi)
    }

    pub fn text(&self, points: f64, color: Rgb) -> TextStyle<'static> {
        let mut style = TextStyle::from((FONT_FAMILY, self.px(points)).into_font());
        style.color = colors::rgb(color).to_backend_color();
        style
    }

    pub fn vertical_text(&self, points: f64, color: Rgb) -> TextStyle<'static> {
        self.text(points, color).transform(FontTransform::Rotate270)
    }

    /// Tick labels and axis descriptions.
    pub fn label(&self) -> TextStyle<'static> {
        self.text(10.0, Rgb::BLACK)
    }

    pub fn axis_color(&self) -> RGBColor {
        colors::rgb(Rgb::BLACK)
    }
}

/// Converts backend coordinates into coordinates relative to `area`.
pub(crate) fn to_local<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    (x, y): (i32, i32),
) -> (i32, i32) {
    let (bx, by) = area.get_base_pixel();
    (x - bx, y - by)
}

pub(crate) fn draw_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    style: &TextStyle,
    pos: Pos,
    at: (i32, i32),
) -> Result<(), Error> {
    area.draw_text(text, &style.pos(pos), at)?;
    Ok(())
}

/// Draws the whole figure for `field` onto `root`.
#[instrument(skip_all, fields(layout = %field.layout()))]
pub fn compose<DB: DrawingBackend>(
    field: &FieldSlice,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), Error> {
    root.fill(&WHITE)?;

    let style = Style::new(field.config().dpi);
    let panels = Panels::new(field.layout(), root.dim_in_pixel());
    trace!(?panels, "Laid out panels");

    let plot = main_panel::draw(field, root, &panels.main, &style)?;

    if let Some(panel) = panels.hslice {
        strip::draw_hslice(field, root, &panel, &style)?;
    }
    if let Some(panel) = panels.vslice {
        strip::draw_vslice(field, root, &panel, &style)?;
    }

    if field.show_colorbar() {
        colorbar::draw(field, root, plot, &style)?;
    }

    if !field.text().is_empty() {
        let text = style.text(10.0, Rgb::FIREBRICK);
        let anchor = Pos::new(HPos::Left, VPos::Bottom);
        draw_text(root, field.text(), &text, anchor, plot.at_fraction(0.02, 0.02))?;
    }

    Ok(())
}
