use ndarray::ArrayView1;
use plotters::{
    chart::ChartBuilder,
    coord::Shift,
    element::Rectangle,
    prelude::{DrawingArea, DrawingBackend},
    style::{
        text_anchor::{HPos, Pos, VPos},
        Color, RGBColor,
    },
};
use sliceplots_core::FieldSlice;
use tracing::debug;

use super::{draw_text, to_local, Style};
use crate::{
    colors,
    grid::{Panel, PixelRect},
    stroke::Stroke,
    Error,
};

/// Gap between a reference line and its annotation, in points.
const ANNOTATION_GAP: f64 = 2.0;

/// Draws the pseudocolor image with its axes, reference lines and their
/// annotations. Returns the plotting rectangle relative to `root`.
pub(super) fn draw<DB: DrawingBackend>(
    field: &FieldSlice,
    root: &DrawingArea<DB, Shift>,
    panel: &Panel,
    style: &Style,
) -> Result<PixelRect, Error> {
    let extent = field.extent();
    let labels = field.labels();

    let area = panel.area();
    let area = root.clone().shrink((area.x, area.y), (area.w, area.h));

    let mut chart = ChartBuilder::on(&area)
        .x_label_area_size(panel.x_label_area)
        .y_label_area_size(panel.y_label_area)
        .build_cartesian_2d(extent.xmin..extent.xmax, extent.ymin..extent.ymax)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(6)
        .y_labels(6)
        .x_desc(labels.x.as_str())
        .y_desc(labels.y.as_str())
        .label_style(style.label())
        .axis_desc_style(style.label())
        .axis_style(style.axis_color().stroke_width(1))
        .draw()?;

    let (xs, ys) = chart.plotting_area().get_pixel_range();
    let (x, y) = to_local(root, (xs.start, ys.start));
    let plot = PixelRect::from_ranges(x..x + xs.len() as i32, y..y + ys.len() as i32);

    let grid = ImageGrid::new(field, plot);
    grid.paint(field, root)?;

    root.draw(&Rectangle::new(
        [(plot.x, plot.y), (plot.right() - 1, plot.bottom() - 1)],
        style.axis_color().stroke_width(1),
    ))?;

    let gap = style.px(ANNOTATION_GAP).round() as i32;
    let config = field.config();

    if let Some(coord) = field.hslice_coord() {
        let left = to_local(root, chart.backend_coord(&(extent.xmin, coord)));
        let right = to_local(root, chart.backend_coord(&(extent.xmax, coord)));
        Stroke::new(&config.hslice_opts, style.dpi).draw(root, &[as_f64(left), as_f64(right)])?;

        draw_text(
            root,
            &format!("{coord:.1}"),
            &style.text(10.0, config.hslice_opts.color),
            Pos::new(HPos::Left, VPos::Bottom),
            (plot.x + 2 * gap, left.1 - gap),
        )?;
    }

    if let Some(coord) = field.vslice_coord() {
        let bottom = to_local(root, chart.backend_coord(&(coord, extent.ymin)));
        let top = to_local(root, chart.backend_coord(&(coord, extent.ymax)));
        Stroke::new(&config.vslice_opts, style.dpi).draw(root, &[as_f64(bottom), as_f64(top)])?;

        // Rotated a quarter turn, so the text runs down from the anchor
        draw_text(
            root,
            &format!("{coord:.1}"),
            &style.vertical_text(10.0, config.vslice_opts.color),
            Pos::new(HPos::Right, VPos::Bottom),
            (top.0 - gap, plot.y + 2 * gap),
        )?;
    }

    Ok(plot)
}

fn as_f64((x, y): (i32, i32)) -> (f64, f64) {
    (x as f64, y as f64)
}

/// Placement of the field samples inside the plotting rectangle.
///
/// Samples are spread evenly with row 0 at the bottom. Decreasing axes are
/// mirrored so that coordinates grow to the right and upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ImageGrid {
    rows: usize,
    cols: usize,
    plot: PixelRect,
    flip_x: bool,
    flip_y: bool,
}

impl ImageGrid {
    fn new(field: &FieldSlice, plot: PixelRect) -> Self {
        let (rows, cols) = field.data().dim();
        Self {
            rows,
            cols,
            plot,
            flip_x: decreasing(field.h_axis()),
            flip_y: decreasing(field.v_axis()),
        }
    }

    /// Pixel rectangle covered by a sample, `None` if it rounds away.
    fn cell(&self, row: usize, col: usize) -> Option<PixelRect> {
        let col = if self.flip_x { self.cols - 1 - col } else { col };
        let row = if self.flip_y { self.rows - 1 - row } else { row };

        let (w, h) = (self.plot.w as usize, self.plot.h as usize);
        let x0 = (col * w / self.cols) as i32;
        let x1 = ((col + 1) * w / self.cols) as i32;
        let y0 = ((row + 1) * h / self.rows) as i32;
        let y1 = (row * h / self.rows) as i32;

        (x1 > x0 && y0 > y1).then(|| {
            PixelRect::new(
                self.plot.x + x0,
                self.plot.bottom() - y0,
                (x1 - x0) as u32,
                (y0 - y1) as u32,
            )
        })
    }

    /// Sample under a pixel offset inside the plotting rectangle.
    fn sample_at(&self, px: u32, py: u32) -> (usize, usize) {
        let (w, h) = (self.plot.w as usize, self.plot.h as usize);
        let from_bottom = h.saturating_sub(1 + py as usize);
        // Inverse of the floor division in `cell`
        let col = (((px as usize + 1) * self.cols - 1) / w).min(self.cols - 1);
        let row = (((from_bottom + 1) * self.rows - 1) / h).min(self.rows - 1);

        let col = if self.flip_x { self.cols - 1 - col } else { col };
        let row = if self.flip_y { self.rows - 1 - row } else { row };
        (row, col)
    }

    fn paint<DB: DrawingBackend>(
        &self,
        field: &FieldSlice,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), Error> {
        let config = field.config();
        let range = field.value_range();
        let data = field.data();
        let color = |row: usize, col: usize| -> Option<RGBColor> {
            config
                .norm
                .normalize(data[[row, col]], range)
                .map(|t| colors::sample(config.cmap, t))
        };

        let pixels = self.plot.w as usize * self.plot.h as usize;
        if self.rows * self.cols <= pixels {
            debug!(rows = self.rows, cols = self.cols, "Painting image by cell");
            for row in 0..self.rows {
                for col in 0..self.cols {
                    let (Some(rect), Some(color)) = (self.cell(row, col), color(row, col)) else {
                        continue;
                    };
                    root.draw(&Rectangle::new(
                        [(rect.x, rect.y), (rect.right() - 1, rect.bottom() - 1)],
                        color.filled(),
                    ))?;
                }
            }
        } else {
            debug!(rows = self.rows, cols = self.cols, "Painting image by pixel");
            for py in 0..self.plot.h {
                for px in 0..self.plot.w {
                    let (row, col) = self.sample_at(px, py);
                    if let Some(color) = color(row, col) {
                        root.draw_pixel((self.plot.x + px as i32, self.plot.y + py as i32), &color)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn decreasing(axis: ArrayView1<f64>) -> bool {
    match (axis.first(), axis.last()) {
        (Some(first), Some(last)) => first > last,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize, flip_x: bool, flip_y: bool) -> ImageGrid {
        ImageGrid {
            rows,
            cols,
            plot: PixelRect::new(10, 20, 40, 40),
            flip_x,
            flip_y,
        }
    }

    #[test]
    fn first_row_sits_at_the_bottom() {
        let grid = grid(4, 4, false, false);
        assert_eq!(grid.cell(0, 0), Some(PixelRect::new(10, 50, 10, 10)));
        assert_eq!(grid.cell(3, 3), Some(PixelRect::new(40, 20, 10, 10)));
    }

    #[test]
    fn cells_tile_the_plot() {
        let grid = grid(3, 7, false, false);
        let area: u32 = (0..3)
            .flat_map(|row| (0..7).map(move |col| (row, col)))
            .filter_map(|(row, col)| grid.cell(row, col))
            .map(|rect| rect.w * rect.h)
            .sum();
        assert_eq!(area, 40 * 40);
    }

    #[test]
    fn flipped_axes_mirror_cells() {
        let grid = grid(4, 4, true, true);
        assert_eq!(grid.cell(0, 0), Some(PixelRect::new(40, 20, 10, 10)));
    }

    #[test]
    fn sampling_agrees_with_cells() {
        for (flip_x, flip_y) in [(false, false), (true, false), (false, true), (true, true)] {
            let grid = grid(5, 3, flip_x, flip_y);
            for row in 0..5 {
                for col in 0..3 {
                    let rect = grid.cell(row, col).unwrap();
                    let px = (rect.x - grid.plot.x) as u32;
                    let py = (rect.y - grid.plot.y) as u32;
                    assert_eq!(grid.sample_at(px, py), (row, col));
                }
            }
        }
    }

    #[test]
    fn decreasing_axis() {
        assert!(decreasing(ndarray::array![3.0, 2.0, 1.0].view()));
        assert!(!decreasing(ndarray::array![1.0, 2.0].view()));
        assert!(!decreasing(ndarray::Array1::<f64>::zeros(0).view()));
    }
}
