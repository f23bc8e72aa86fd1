use plotters::{
    chart::ChartBuilder,
    coord::Shift,
    element::Rectangle,
    prelude::{DrawingArea, DrawingBackend},
    style::{
        text_anchor::{HPos, Pos, VPos},
        Color,
    },
};
use sliceplots_core::{FieldSlice, Norm, Range, Rgb};

use super::{draw_text, Style};
use crate::{colors, grid::PixelRect, Error};

/// Size of the bar relative to the main plotting area.
const WIDTH_FRACTION: f64 = 0.7;
const HEIGHT_FRACTION: f64 = 0.03;
/// Inset from the upper left corner, in points.
const BORDER_PAD: f64 = 5.0;
const TICK_FONT: f64 = 8.0;
const TICKS: usize = 5;

/// Horizontal colorbar inset into the upper left of the main plot.
pub(super) fn draw<DB: DrawingBackend>(
    field: &FieldSlice,
    root: &DrawingArea<DB, Shift>,
    plot: PixelRect,
    style: &Style,
) -> Result<(), Error> {
    let config = field.config();
    let pad = style.px(BORDER_PAD).round() as i32;
    let tick_area = (style.px(TICK_FONT) * 2.0).round() as u32;
    let bar = PixelRect::new(
        plot.x + pad,
        plot.y + pad,
        ((plot.w as f64 * WIDTH_FRACTION).round() as u32).max(2),
        ((plot.h as f64 * HEIGHT_FRACTION).round() as u32).max(2),
    );

    let scale = Scale::new(config.norm, field.value_range());
    let area = root
        .clone()
        .shrink((bar.x, bar.y), (bar.w, bar.h + tick_area));
    let mut chart = ChartBuilder::on(&area)
        .x_label_area_size(tick_area)
        .build_cartesian_2d(scale.axis.into_range(), 0f64..1f64)?;

    let columns = chart.plotting_area().get_pixel_range().0.len().max(1);
    chart.draw_series((0..columns).map(|i| {
        let t0 = i as f64 / columns as f64;
        let t1 = (i + 1) as f64 / columns as f64;
        Rectangle::new(
            [(scale.at(t0), 0.0), (scale.at(t1), 1.0)],
            colors::sample(config.cmap, (t0 + t1) / 2.0).filled(),
        )
    }))?;

    let annotation = colors::rgb(Rgb::FIREBRICK);
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_labels(TICKS)
        .x_label_formatter(&|x| format_tick(scale.value(*x)))
        .label_style(style.text(TICK_FONT, Rgb::FIREBRICK))
        .axis_style(annotation.stroke_width(1))
        .draw()?;

    chart.plotting_area().draw(&Rectangle::new(
        [(scale.axis.min, 0.0), (scale.axis.max, 1.0)],
        style.axis_color().stroke_width(1),
    ))?;

    draw_text(
        root,
        &field.labels().z,
        &style.text(10.0, Rgb::FIREBRICK),
        Pos::new(HPos::Left, VPos::Bottom),
        plot.at_fraction(0.74, 0.97),
    )
}

/// Colorbar axis. Linear norms get a value axis and with it round tick
/// values, other norms run along the colormap position and label ticks
/// through the inverse norm.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scale {
    norm: Norm,
    range: Range<f64>,
    axis: Range<f64>,
    value_axis: bool,
}

impl Scale {
    fn new(norm: Norm, range: Range<f64>) -> Self {
        let value_axis = norm == Norm::Linear && range.width() > 0.0;
        let axis = if value_axis {
            range
        } else {
            Range::new(0.0, 1.0)
        };
        Self {
            norm,
            range,
            axis,
            value_axis,
        }
    }

    /// Axis coordinate of colormap position `t`.
    fn at(&self, t: f64) -> f64 {
        self.axis.min + t * self.axis.width()
    }

    /// Field value shown at axis coordinate `x`.
    fn value(&self, x: f64) -> f64 {
        if self.value_axis {
            x
        } else {
            self.norm.denormalize(x, self.range)
        }
    }
}

fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-2..1e4).contains(&magnitude) {
        return format!("{value:.1e}");
    }

    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_format() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(-0.25), "-0.25");
        assert_eq!(format_tick(12345.0), "1.2e4");
        assert_eq!(format_tick(0.001), "1.0e-3");
    }

    #[test]
    fn linear_scale_runs_along_values() {
        let scale = Scale::new(Norm::Linear, Range::new(2.0, 6.0));
        assert!(scale.value_axis);
        assert_eq!(scale.at(0.5), 4.0);
        assert_eq!(scale.value(3.0), 3.0);
    }

    #[test]
    fn log_scale_labels_through_the_inverse() {
        let scale = Scale::new(Norm::Log, Range::new(1.0, 100.0));
        assert!(!scale.value_axis);
        assert_eq!(scale.at(0.5), 0.5);
        assert!((scale.value(0.5) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn symlog_on_the_unit_range_is_not_a_value_axis() {
        let scale = Scale::new(Norm::SymLog { linthresh: 0.1 }, Range::new(0.0, 1.0));
        assert!(!scale.value_axis);
        assert!((scale.value(1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn flat_linear_scale_falls_back_to_positions() {
        let scale = Scale::new(Norm::Linear, Range::new(3.0, 3.0));
        assert!(!scale.value_axis);
        assert_eq!(scale.value(0.7), 3.0);
    }
}
