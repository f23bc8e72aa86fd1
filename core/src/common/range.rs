use std::ops::{Div, Sub};

use serde::{Deserialize, Serialize};

/// Inclusive range between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range<N> {
    pub min: N,
    pub max: N,
}

impl<N> Range<N> {
    pub fn new(min: N, max: N) -> Self {
        Self { min, max }
    }
}

impl<N: Default> Default for Range<N> {
    fn default() -> Self {
        Self {
            min: N::default(),
            max: N::default(),
        }
    }
}

impl<N: Sub<Output = N> + Div<Output = N> + Copy> Range<N> {
    pub fn width(&self) -> <N as Sub>::Output {
        self.max - self.min
    }

    /// Maps `value` onto `0..=1` relative to this range.
    pub fn map(&self, value: N) -> <<N as Sub>::Output as Div>::Output {
        (value - self.min) / self.width()
    }
}

impl<N> Range<N> {
    pub fn into_range(self) -> std::ops::Range<N> {
        self.min..self.max
    }
}

impl<N: PartialOrd + Copy> Range<N> {
    pub fn clamp(&self, value: N) -> N {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn expand(&self, new: N) -> Self {
        Self::new(
            if self.min < new { self.min } else { new },
            if self.max > new { self.max } else { new },
        )
    }

    pub fn from_iter_val(iter: impl IntoIterator<Item = N>) -> Option<Range<N>> {
        iter.into_iter().fold(None, |acc, n| match acc {
            Some(acc) => Some(acc.expand(n)),
            None => Some(Range::new(n, n)),
        })
    }
}

impl Range<f64> {
    /// Like [`Range::from_iter_val`], skipping `NaN` and infinities.
    pub fn from_finite(iter: impl IntoIterator<Item = f64>) -> Option<Range<f64>> {
        Self::from_iter_val(iter.into_iter().filter(|x| x.is_finite()))
    }

    /// Pads a zero-width range so it can back a chart axis.
    pub fn padded_if_flat(&self, pad: f64) -> Self {
        if self.width() > 0.0 {
            *self
        } else {
            Self::new(self.min - pad, self.max + pad)
        }
    }
}

impl<N> From<Range<N>> for std::ops::Range<N> {
    fn from(range: Range<N>) -> Self {
        range.into_range()
    }
}
