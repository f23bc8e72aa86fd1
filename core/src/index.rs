use ndarray::{ArrayView1, Slice};

use crate::error::{Error, InputError};

/// Index of the sample in `axis` closest to `value`.
///
/// Linear scan, so the axis does not have to be sorted. On a tie the
/// lower index wins. Values beyond either end of a monotonic axis land
/// on the boundary index.
pub fn nearest_index(axis: ArrayView1<f64>, value: f64) -> Result<usize, Error> {
    if !value.is_finite() {
        return Err(InputError::NonFiniteCoordinate(value).into());
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, x) in axis.iter().enumerate() {
        let distance = (x - value).abs();
        match best {
            // Strict comparison keeps the first of two equal distances
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i).ok_or(InputError::EmptyAxis.into())
}

/// Inclusive window of indices `first..=last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexWindow {
    pub first: usize,
    pub last: usize,
}

impl IndexWindow {
    /// Window spanning two resolved indices, in whichever order they came.
    pub fn spanning(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            last: a.max(b),
        }
    }

    /// A window covering a single sample has no extent to draw.
    pub fn is_degenerate(&self) -> bool {
        self.first >= self.last
    }

    pub fn slice(&self) -> Slice {
        Slice::from(self.first..=self.last)
    }
}
