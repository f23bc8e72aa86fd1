use derive_more::Display;

/// Panel arrangement, picked once from the resolved slice indices.
///
/// ```text
/// Single      Horizontal     Vertical       Both
/// +------+    +------+       +------+--+    +------+
/// |      |    |  h   |       |      |  |    |  h   |
/// | main |    +------+       | main |v |    +------+--+
/// |      |    | main |       |      |  |    | main |v |
/// +------+    +------+       +------+--+    +------+--+
/// ```
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    #[display(fmt = "single")]
    Single,
    #[display(fmt = "horizontal slice at row {}", row)]
    Horizontal { row: usize },
    #[display(fmt = "vertical slice at column {}", col)]
    Vertical { col: usize },
    #[display(fmt = "slices at row {}, column {}", row, col)]
    Both { row: usize, col: usize },
}

impl Layout {
    pub fn select(hslice_row: Option<usize>, vslice_col: Option<usize>) -> Self {
        match (hslice_row, vslice_col) {
            (None, None) => Layout::Single,
            (Some(row), None) => Layout::Horizontal { row },
            (None, Some(col)) => Layout::Vertical { col },
            (Some(row), Some(col)) => Layout::Both { row, col },
        }
    }

    /// Row of the horizontal slice, if there is one.
    pub fn hslice_row(&self) -> Option<usize> {
        match *self {
            Layout::Horizontal { row } | Layout::Both { row, .. } => Some(row),
            Layout::Single | Layout::Vertical { .. } => None,
        }
    }

    /// Column of the vertical slice, if there is one.
    pub fn vslice_col(&self) -> Option<usize> {
        match *self {
            Layout::Vertical { col } | Layout::Both { col, .. } => Some(col),
            Layout::Single | Layout::Horizontal { .. } => None,
        }
    }

    pub fn panel_count(&self) -> usize {
        1 + self.hslice_row().is_some() as usize + self.vslice_col().is_some() as usize
    }
}
