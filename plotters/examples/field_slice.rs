use std::{env, fs};

use ndarray::Array;
use sliceplots_core::{Colormap, LineStyle, Norm, PlotConfig, Rgb, SliceStyle};
use sliceplots_plotters::FieldSlicePlot;
use tracing::info;

/// Writes a Gaussian bump with both slices to an SVG file.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let out = env::args()
        .nth(1)
        .unwrap_or_else(|| "field_slice.svg".to_string());

    let h_axis = Array::linspace(-5.0, 5.0, 120);
    let v_axis = Array::linspace(-3.0, 3.0, 80);
    let field = Array::from_shape_fn((v_axis.len(), h_axis.len()), |(row, col)| {
        let (x, y): (f64, f64) = (h_axis[col], v_axis[row]);
        (-(x * x) / 4.0 - y * y).exp() * (2.0 * x).cos()
    });

    let config = PlotConfig::default()
        .with_extent((-4.0, 4.0, -2.5, 2.5))
        .with_hslice(0.5)
        .with_vslice(-1.0)
        .with_vslice_opts(
            SliceStyle::default()
                .with_color(Rgb::ROYALBLUE)
                .with_style(LineStyle::Dashed)
                .with_width(1.0),
        )
        .with_norm(Norm::SymLog { linthresh: 0.1 })
        .with_cmap(Colormap::Viridis)
        .with_text("t = 0 fs");

    let plot = FieldSlicePlot::new(
        field.view(),
        h_axis.view(),
        v_axis.view(),
        sliceplots_core::Labels::new("x [um]", "y [um]", "E [a.u.]"),
        config,
    )?;
    info!(%plot, layout = %plot.layout(), "Rendered");

    fs::write(&out, plot.to_svg()?)?;
    info!(path = %out, "Wrote SVG");
    Ok(())
}
