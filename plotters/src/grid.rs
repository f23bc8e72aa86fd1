use sliceplots_core::Layout;

/// Fractions of the figure taken by the axes region, as `(left, right, bottom, top)`
/// measured from the lower left corner.
pub const SUBPLOT_BOX: (f64, f64, f64, f64) = (0.125, 0.9, 0.11, 0.88);

/// Gap between neighbouring panels relative to the average panel size.
pub const PANEL_SPACING: f64 = 0.03;

/// Pixel rectangle relative to the figure origin (upper left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_ranges(x: std::ops::Range<i32>, y: std::ops::Range<i32>) -> Self {
        Self::new(
            x.start,
            y.start,
            (x.end - x.start).max(0) as u32,
            (y.end - y.start).max(0) as u32,
        )
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Pixel of an axes fraction, `(0, 0)` being the lower left corner.
    pub fn at_fraction(&self, fx: f64, fy: f64) -> (i32, i32) {
        (
            self.x + (fx * self.w as f64).round() as i32,
            self.bottom() - (fy * self.h as f64).round() as i32,
        )
    }
}

/// One panel: the plotting rectangle plus the label areas glued to its
/// left and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub plot: PixelRect,
    pub y_label_area: u32,
    pub x_label_area: u32,
}

impl Panel {
    /// The rectangle handed to the chart builder.
    pub fn area(&self) -> PixelRect {
        PixelRect::new(
            self.plot.x - self.y_label_area as i32,
            self.plot.y,
            self.plot.w + self.y_label_area,
            self.plot.h + self.x_label_area,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub main: Panel,
    pub hslice: Option<Panel>,
    pub vslice: Option<Panel>,
}

impl Panels {
    pub fn new(layout: Layout, (width, height): (u32, u32)) -> Self {
        let (left, right, bottom, top) = SUBPLOT_BOX;
        let (w, h) = (width as f64, height as f64);

        let x0 = left * w;
        let y0 = (1.0 - top) * h;
        let total_w = (right - left) * w;
        let total_h = (top - bottom) * h;

        let (cols, rows): (&[f64], &[f64]) = match layout {
            Layout::Single => (&[1.0], &[1.0]),
            Layout::Horizontal { .. } => (&[1.0], &[1.0, 3.0]),
            Layout::Vertical { .. } => (&[3.0, 1.0], &[1.0]),
            Layout::Both { .. } => (&[3.0, 1.0], &[1.0, 3.0]),
        };
        let cols = split(x0, total_w, cols);
        let rows = split(y0, total_h, rows);

        let cell = |row: usize, col: usize| {
            let (x, w) = cols[col];
            let (y, h) = rows[row];
            let x_px = x.round() as i32;
            let y_px = y.round() as i32;
            PixelRect::new(
                x_px,
                y_px,
                ((x + w).round() as i32 - x_px).max(1) as u32,
                ((y + h).round() as i32 - y_px).max(1) as u32,
            )
        };

        let main_row = rows.len() - 1;
        let main_plot = cell(main_row, 0);
        // Everything left of and below the main panel is label area
        let y_label_area = main_plot.x.max(0) as u32;
        let x_label_area = (height as i32 - main_plot.bottom()).max(0) as u32;

        let main = Panel {
            plot: main_plot,
            y_label_area,
            x_label_area,
        };

        let hslice = layout.hslice_row().map(|_| Panel {
            plot: cell(0, 0),
            y_label_area,
            x_label_area: 0,
        });

        let vslice = layout.vslice_col().map(|_| Panel {
            plot: cell(main_row, 1),
            y_label_area: 0,
            x_label_area,
        });

        Self {
            main,
            hslice,
            vslice,
        }
    }
}

/// Lays out cells with the given size ratios along one dimension.
///
/// Mirrors matplotlib's gridspec: the gap is [`PANEL_SPACING`] of the
/// average cell size. Returns `(offset, size)` per cell.
fn split(start: f64, total: f64, ratios: &[f64]) -> Vec<(f64, f64)> {
    let n = ratios.len() as f64;
    let cell = total / (n + PANEL_SPACING * (n - 1.0));
    let gap = PANEL_SPACING * cell;
    let ratio_sum: f64 = ratios.iter().sum();

    let mut offset = start;
    ratios
        .iter()
        .map(|ratio| {
            let size = cell * n * ratio / ratio_sum;
            let out = (offset, size);
            offset += size + gap;
            out
        })
        .collect()
}
