use std::fmt::{self, Display, Formatter};

use ndarray::{ArrayView1, ArrayView2};
use plotters::{
    coord::Shift,
    prelude::{BitMapBackend, DrawingArea, DrawingBackend, IntoDrawingArea, SVGBackend},
};
use sliceplots_core::{FieldSlice, Labels, Layout, PlotConfig, Rgb};
use tracing::{debug, instrument};

use crate::{draw::compose, Error};

/// A rendered figure, kept as a packed RGB buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Figure {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Figure {
    const CHANNELS: usize = 3;

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major RGB bytes, three per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Color at `(x, y)`, counted from the upper left corner.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        Some(Rgb(self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]))
    }
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Pseudocolor plot of a 2D field with optional slice strips and an inset
/// colorbar.
///
/// Everything is computed on construction; the instance is immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct FieldSlicePlot {
    field: FieldSlice,
    figure: Figure,
}

impl FieldSlicePlot {
    /// Crops the field, resolves the slices and renders the figure.
    #[instrument(skip_all, fields(shape = ?arr2d.dim()))]
    pub fn new(
        arr2d: ArrayView2<f64>,
        h_axis: ArrayView1<f64>,
        v_axis: ArrayView1<f64>,
        labels: Labels,
        config: PlotConfig,
    ) -> Result<Self, Error> {
        let field = FieldSlice::new(arr2d, h_axis, v_axis, labels, config)?;
        Self::from_field(field)
    }

    /// Renders an already prepared field.
    pub fn from_field(field: FieldSlice) -> Result<Self, Error> {
        let (width, height) = field.config().pixel_size();
        let mut pixels = vec![0; width as usize * height as usize * Figure::CHANNELS];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            compose(&field, &root)?;
            root.present()?;
        }
        debug!(width, height, layout = %field.layout(), "Rendered figure");

        Ok(Self {
            field,
            figure: Figure {
                width,
                height,
                pixels,
            },
        })
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn field(&self) -> &FieldSlice {
        &self.field
    }

    pub fn layout(&self) -> Layout {
        self.field.layout()
    }

    /// Draws the plot again onto a caller supplied area, e.g. a file backend.
    pub fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), Error> {
        compose(&self.field, root)?;
        root.present()?;
        Ok(())
    }

    /// The plot as an SVG document at the configured size.
    pub fn to_svg(&self) -> Result<String, Error> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.figure.size()).into_drawing_area();
            self.draw_on(&root)?;
        }
        Ok(svg)
    }
}

impl Display for FieldSlicePlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.field, f)
    }
}
