use std::str::FromStr;

use derive_more::{Constructor, Display};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{crop::Extent, error::Error, norm::Norm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Constructor, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const FIREBRICK: Rgb = Rgb(178, 34, 34);
    pub const ROYALBLUE: Rgb = Rgb(65, 105, 225);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    const NAMED: &'static [(&'static str, Rgb)] = &[
        ("firebrick", Rgb::FIREBRICK),
        ("royalblue", Rgb::ROYALBLUE),
        ("black", Rgb::BLACK),
        ("white", Rgb::WHITE),
        ("red", Rgb(255, 0, 0)),
        ("green", Rgb(0, 128, 0)),
        ("blue", Rgb(0, 0, 255)),
        ("orange", Rgb(255, 165, 0)),
        ("gray", Rgb(128, 128, 128)),
        ("grey", Rgb(128, 128, 128)),
        ("cyan", Rgb(0, 255, 255)),
        ("magenta", Rgb(255, 0, 255)),
        ("yellow", Rgb(255, 255, 0)),
        ("steelblue", Rgb(70, 130, 180)),
        ("darkgreen", Rgb(0, 100, 0)),
    ];
}

impl FromStr for Rgb {
    type Err = Error;

    /// Accepts a handful of CSS color names and `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unknown = || Error::UnknownColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(unknown());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| unknown());
            return Ok(Rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        Rgb::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, rgb)| *rgb)
            .ok_or_else(unknown)
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    #[display(fmt = "-")]
    Solid,
    #[display(fmt = "--")]
    Dashed,
    #[display(fmt = ":")]
    Dotted,
}

impl LineStyle {
    /// On/off run lengths in multiples of the line width, `None` for solid.
    pub fn dash_pattern(&self) -> Option<(f64, f64)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((3.7, 1.6)),
            LineStyle::Dotted => Some((1.0, 1.65)),
        }
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            other => Err(Error::UnknownLineStyle(other.to_string())),
        }
    }
}

/// How a slice line is drawn, both on the main panel and in its strip.
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceStyle {
    pub style: LineStyle,
    pub color: Rgb,
    /// Line width in points.
    pub width: f64,
}

impl Default for SliceStyle {
    fn default() -> Self {
        Self {
            style: LineStyle::Solid,
            color: Rgb::FIREBRICK,
            width: 0.5,
        }
    }
}

impl SliceStyle {
    /// Default look of the vertical slice, told apart from the horizontal one by color.
    pub fn vertical() -> Self {
        Self::default().with_color(Rgb::ROYALBLUE)
    }

    pub fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }

    pub fn with_style(self, style: LineStyle) -> Self {
        Self { style, ..self }
    }

    pub fn with_width(self, width: f64) -> Self {
        Self { width, ..self }
    }
}

/// A serialized [`SliceStyle`] where any field may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SliceStyleOverrides {
    style: Option<LineStyle>,
    color: Option<Rgb>,
    width: Option<f64>,
}

impl SliceStyleOverrides {
    fn apply(self, base: SliceStyle) -> SliceStyle {
        SliceStyle {
            style: self.style.unwrap_or(base.style),
            color: self.color.unwrap_or(base.color),
            width: self.width.unwrap_or(base.width),
        }
    }
}

fn vertical_slice_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SliceStyle, D::Error> {
    SliceStyleOverrides::deserialize(deserializer).map(|o| o.apply(SliceStyle::vertical()))
}

/// Named color palettes for the pseudocolor image.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    #[display(fmt = "viridis")]
    Viridis,
    #[display(fmt = "bone")]
    Bone,
    #[display(fmt = "copper")]
    Copper,
    #[display(fmt = "gray")]
    Gray,
    #[display(fmt = "mandelbrot")]
    Mandelbrot,
    #[display(fmt = "vulcano")]
    Vulcano,
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "bone" => Ok(Colormap::Bone),
            "copper" => Ok(Colormap::Copper),
            "gray" | "grey" | "binary" => Ok(Colormap::Gray),
            "mandelbrot" => Ok(Colormap::Mandelbrot),
            "vulcano" => Ok(Colormap::Vulcano),
            _ => Err(Error::UnknownColormap(s.to_string())),
        }
    }
}

/// Axis labels; `z` labels the value axis of the strips and the colorbar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Labels {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }
}

/// Options for a field plot. Every field is optional, [`Default`] gives the
/// documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// View window, defaults to the full axis ranges.
    pub extent: Option<Extent>,
    /// Lower end of the color scale, defaults to the cropped data minimum.
    pub vmin: Option<f64>,
    /// Upper end of the color scale, defaults to the cropped data maximum.
    pub vmax: Option<f64>,
    /// Vertical coordinate of the horizontal slice.
    pub hslice_val: Option<f64>,
    /// Horizontal coordinate of the vertical slice.
    pub vslice_val: Option<f64>,
    pub hslice_opts: SliceStyle,
    #[serde(deserialize_with = "vertical_slice_style")]
    pub vslice_opts: SliceStyle,
    pub cbar: bool,
    pub norm: Norm,
    /// Caption drawn in the lower left corner of the main panel.
    pub text: String,
    /// Figure size in inches.
    pub figsize: (f64, f64),
    pub dpi: u32,
    pub cmap: Colormap,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            extent: None,
            vmin: None,
            vmax: None,
            hslice_val: None,
            vslice_val: None,
            hslice_opts: SliceStyle::default(),
            vslice_opts: SliceStyle::vertical(),
            cbar: true,
            norm: Norm::Linear,
            text: String::new(),
            figsize: (8.0, 8.0),
            dpi: 100,
            cmap: Colormap::Viridis,
        }
    }
}

impl PlotConfig {
    pub fn with_extent(mut self, extent: impl Into<Extent>) -> Self {
        self.extent = Some(extent.into());
        self
    }

    pub fn with_vmin(mut self, vmin: f64) -> Self {
        self.vmin = Some(vmin);
        self
    }

    pub fn with_vmax(mut self, vmax: f64) -> Self {
        self.vmax = Some(vmax);
        self
    }

    pub fn with_hslice(mut self, value: f64) -> Self {
        self.hslice_val = Some(value);
        self
    }

    pub fn with_vslice(mut self, value: f64) -> Self {
        self.vslice_val = Some(value);
        self
    }

    pub fn with_hslice_opts(mut self, opts: SliceStyle) -> Self {
        self.hslice_opts = opts;
        self
    }

    pub fn with_vslice_opts(mut self, opts: SliceStyle) -> Self {
        self.vslice_opts = opts;
        self
    }

    pub fn with_cbar(mut self, cbar: bool) -> Self {
        self.cbar = cbar;
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_figsize(mut self, width: f64, height: f64) -> Self {
        self.figsize = (width, height);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_cmap(mut self, cmap: Colormap) -> Self {
        self.cmap = cmap;
        self
    }

    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figsize;
        let dpi = f64::from(self.dpi);
        ((w * dpi).round().max(1.0) as u32, (h * dpi).round().max(1.0) as u32)
    }
}
