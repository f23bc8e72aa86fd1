use plotters::{
    coord::Shift,
    element::PathElement,
    prelude::{DrawingArea, DrawingBackend},
    style::{Color, RGBColor},
};
use sliceplots_core::SliceStyle;

use crate::Error;

pub type PixelPoint = (f64, f64);

/// Pixels per typographic point at the given resolution.
pub fn points_to_pixels(points: f64, dpi: u32) -> f64 {
    points * dpi as f64 / 72.0
}

/// A resolved line style in pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: RGBColor,
    pub width: u32,
    pub dashes: Option<(f64, f64)>,
}

impl Stroke {
    pub fn new(style: &SliceStyle, dpi: u32) -> Self {
        let width_px = points_to_pixels(style.width, dpi);
        let width = width_px.round().max(1.0) as u32;
        // Dash lengths scale with the line width, like matplotlib's
        let dashes = style
            .style
            .dash_pattern()
            .map(|(on, off)| (on * width_px.max(1.0), off * width_px.max(1.0)));

        Self {
            color: crate::colors::rgb(style.color),
            width,
            dashes,
        }
    }

    /// Draws a polyline given in pixel coordinates of `area`.
    pub fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        points: &[PixelPoint],
    ) -> Result<(), Error> {
        let runs = match self.dashes {
            None => vec![points.to_vec()],
            Some((on, off)) => dash(points, on, off),
        };

        let style = self.color.stroke_width(self.width);
        for run in runs.into_iter().filter(|run| run.len() >= 2) {
            let run: Vec<(i32, i32)> = run
                .into_iter()
                .map(|(x, y)| (x.round() as i32, y.round() as i32))
                .collect();
            area.draw(&PathElement::new(run, style))?;
        }
        Ok(())
    }
}

/// Splits a polyline into its visible dashes.
///
/// The pattern restarts at the first point and carries over corners.
pub fn dash(points: &[PixelPoint], on: f64, off: f64) -> Vec<Vec<PixelPoint>> {
    let mut dashes = Vec::new();
    if points.len() < 2 || on <= 0.0 {
        return dashes;
    }
    let off = off.max(0.0);

    let mut drawing = true;
    let mut left = on;
    let mut current = vec![points[0]];

    for pair in points.windows(2) {
        let (mut from, to) = (pair[0], pair[1]);
        let mut remaining = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt();

        while remaining > left {
            let t = left / remaining;
            let split = (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
            if drawing {
                current.push(split);
                dashes.push(std::mem::take(&mut current));
                left = off;
            } else {
                current = vec![split];
                left = on;
            }
            drawing = !drawing;
            remaining -= (split.0 - from.0).hypot(split.1 - from.1);
            from = split;
        }

        left -= remaining;
        if drawing {
            current.push(to);
        }
    }

    if drawing && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}
