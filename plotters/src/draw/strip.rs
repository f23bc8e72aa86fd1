use plotters::{
    chart::{ChartBuilder, ChartContext},
    coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
    prelude::{DrawingArea, DrawingBackend},
    style::Color,
};
use sliceplots_core::{FieldSlice, Range};

use super::{to_local, Style};
use crate::{
    clip::{ClipRect, Point},
    grid::Panel,
    stroke::Stroke,
    Error,
};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Strip axes need a non-zero span even for a constant field.
const FLAT_PAD: f64 = 0.5;

const VALUE_TICKS: usize = 4;

/// Profile along the horizontal slice, drawn above the main panel with a
/// shared x axis.
pub(super) fn draw_hslice<DB: DrawingBackend>(
    field: &FieldSlice,
    root: &DrawingArea<DB, Shift>,
    panel: &Panel,
    style: &Style,
) -> Result<(), Error> {
    let Some((coords, values)) = field.hslice_profile() else {
        return Ok(());
    };
    let extent = field.extent();
    let range = value_axis(field);

    let area = panel.area();
    let area = root.clone().shrink((area.x, area.y), (area.w, area.h));
    let mut chart = ChartBuilder::on(&area)
        .y_label_area_size(panel.y_label_area)
        .build_cartesian_2d(extent.xmin..extent.xmax, range.into_range())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(VALUE_TICKS)
        .y_desc(field.labels().z.as_str())
        .label_style(style.label())
        .axis_desc_style(style.label())
        .axis_style(style.axis_color().stroke_width(1))
        .draw()?;

    let clip = ClipRect::new((extent.xmin, range.min), (extent.xmax, range.max));
    let points = coords.iter().zip(values.iter()).map(|(&x, &y)| (x, y));
    let stroke = Stroke::new(&field.config().hslice_opts, style.dpi);
    draw_profile(&chart, root, clip, points, &stroke)
}

/// Profile along the vertical slice, drawn right of the main panel with a
/// shared y axis.
pub(super) fn draw_vslice<DB: DrawingBackend>(
    field: &FieldSlice,
    root: &DrawingArea<DB, Shift>,
    panel: &Panel,
    style: &Style,
) -> Result<(), Error> {
    let Some((coords, values)) = field.vslice_profile() else {
        return Ok(());
    };
    let extent = field.extent();
    let range = value_axis(field);

    let area = panel.area();
    let area = root.clone().shrink((area.x, area.y), (area.w, area.h));
    let mut chart = ChartBuilder::on(&area)
        .x_label_area_size(panel.x_label_area)
        .build_cartesian_2d(range.into_range(), extent.ymin..extent.ymax)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_labels(VALUE_TICKS)
        .x_desc(field.labels().z.as_str())
        .label_style(style.label())
        .axis_desc_style(style.label())
        .axis_style(style.axis_color().stroke_width(1))
        .draw()?;

    let clip = ClipRect::new((range.min, extent.ymin), (range.max, extent.ymax));
    let points = values.iter().zip(coords.iter()).map(|(&x, &y)| (x, y));
    let stroke = Stroke::new(&field.config().vslice_opts, style.dpi);
    draw_profile(&chart, root, clip, points, &stroke)
}

fn value_axis(field: &FieldSlice) -> Range<f64> {
    field.value_range().padded_if_flat(FLAT_PAD)
}

fn draw_profile<DB: DrawingBackend>(
    chart: &Chart<'_, DB>,
    root: &DrawingArea<DB, Shift>,
    clip: ClipRect,
    points: impl Iterator<Item = Point>,
    stroke: &Stroke,
) -> Result<(), Error> {
    for run in clip.clip_polyline(points) {
        let pixels: Vec<_> = run
            .iter()
            .map(|point| {
                let (x, y) = to_local(root, chart.backend_coord(point));
                (x as f64, y as f64)
            })
            .collect();
        stroke.draw(root, &pixels)?;
    }
    Ok(())
}
