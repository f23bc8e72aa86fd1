use plotters::style::{
    colors::colormaps::{BlackWhite, Bone, ColorMap, Copper, MandelbrotHSL, ViridisRGB, VulcanoHSL},
    Color, RGBColor,
};
use sliceplots_core::{Colormap, Rgb};

pub fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Color for a normalized value in `0..=1`.
pub fn sample(cmap: Colormap, t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    match cmap {
        Colormap::Viridis => to_rgb(ViridisRGB.get_color(t)),
        Colormap::Bone => to_rgb(Bone.get_color(t)),
        Colormap::Copper => to_rgb(Copper.get_color(t)),
        Colormap::Gray => to_rgb(BlackWhite.get_color(t)),
        Colormap::Mandelbrot => to_rgb(MandelbrotHSL.get_color(t)),
        Colormap::Vulcano => to_rgb(VulcanoHSL.get_color(t)),
    }
}

fn to_rgb(color: impl Color) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_runs_black_to_white() {
        assert_eq!(sample(Colormap::Gray, 0.0), RGBColor(0, 0, 0));
        assert_eq!(sample(Colormap::Gray, 1.0), RGBColor(255, 255, 255));
    }

    #[test]
    fn out_of_range_takes_the_boundary_color() {
        for cmap in [Colormap::Viridis, Colormap::Bone, Colormap::Vulcano] {
            assert_eq!(sample(cmap, -3.0), sample(cmap, 0.0));
            assert_eq!(sample(cmap, 7.0), sample(cmap, 1.0));
        }
    }

    #[test]
    fn viridis_ends_differ() {
        assert_ne!(sample(Colormap::Viridis, 0.0), sample(Colormap::Viridis, 1.0));
    }

    #[test]
    fn named_colors_convert() {
        assert_eq!(rgb(Rgb::FIREBRICK), RGBColor(178, 34, 34));
    }
}
