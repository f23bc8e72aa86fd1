use serde::{Deserialize, Serialize};

use crate::{common::range::Range, error::Error};

/// Maps field values onto the `0..=1` colormap input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Norm {
    #[default]
    Linear,
    Log,
    /// Linear within `±linthresh`, logarithmic outside.
    SymLog { linthresh: f64 },
    Power { gamma: f64 },
}

impl Norm {
    pub fn validate(&self, range: Range<f64>) -> Result<(), Error> {
        match *self {
            Norm::Linear => Ok(()),
            Norm::Log if range.min <= 0.0 => Err(Error::InvalidNorm(format!(
                "log scale needs a positive vmin, got {}",
                range.min
            ))),
            Norm::Log => Ok(()),
            Norm::SymLog { linthresh } if !(linthresh > 0.0 && linthresh.is_finite()) => Err(
                Error::InvalidNorm(format!("linthresh must be positive, got {linthresh}")),
            ),
            Norm::SymLog { .. } => Ok(()),
            Norm::Power { gamma } if !(gamma > 0.0 && gamma.is_finite()) => Err(
                Error::InvalidNorm(format!("gamma must be positive, got {gamma}")),
            ),
            Norm::Power { .. } => Ok(()),
        }
    }

    /// Position of `value` on the color scale, clipped to `0..=1`.
    ///
    /// `None` for values the norm cannot place (`NaN`, or non-positive
    /// values on a log scale). A flat range maps everything to `0`.
    pub fn normalize(&self, value: f64, range: Range<f64>) -> Option<f64> {
        if value.is_nan() || (*self == Norm::Log && value <= 0.0) {
            return None;
        }

        let forward = |x: f64| self.forward(x);
        let lo = forward(range.min);
        let hi = forward(range.max);
        if hi <= lo {
            return Some(0.0);
        }

        let t = match *self {
            // Values below vmin would hit a fractional power of a negative number
            Norm::Power { gamma } => range.map(range.clamp(value)).powf(gamma),
            _ => (forward(value) - lo) / (hi - lo),
        };
        Some(t.clamp(0.0, 1.0))
    }

    /// Value sitting at position `t` of the color scale.
    pub fn denormalize(&self, t: f64, range: Range<f64>) -> f64 {
        match *self {
            Norm::Power { gamma } => range.min + t.max(0.0).powf(gamma.recip()) * range.width(),
            _ => {
                let lo = self.forward(range.min);
                let hi = self.forward(range.max);
                self.backward(lo + t * (hi - lo))
            }
        }
    }

    fn forward(&self, x: f64) -> f64 {
        match *self {
            Norm::Linear | Norm::Power { .. } => x,
            Norm::Log => x.ln(),
            Norm::SymLog { linthresh } => {
                if x.abs() <= linthresh {
                    x / linthresh
                } else {
                    x.signum() * (1.0 + (x.abs() / linthresh).ln())
                }
            }
        }
    }

    fn backward(&self, y: f64) -> f64 {
        match *self {
            Norm::Linear | Norm::Power { .. } => y,
            Norm::Log => y.exp(),
            Norm::SymLog { linthresh } => {
                if y.abs() <= 1.0 {
                    y * linthresh
                } else {
                    y.signum() * linthresh * (y.abs() - 1.0).exp()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * (1.0 + b.abs())
    }

    const NORMS: [Norm; 4] = [
        Norm::Linear,
        Norm::Log,
        Norm::SymLog { linthresh: 0.5 },
        Norm::Power { gamma: 2.0 },
    ];

    #[test]
    fn endpoints() {
        let range = Range::new(0.1, 10.0);
        for norm in NORMS {
            assert_eq!(norm.normalize(0.1, range), Some(0.0), "{norm:?}");
            assert!(close(norm.normalize(10.0, range).unwrap(), 1.0), "{norm:?}");
        }
    }

    #[test]
    fn clips_out_of_range() {
        let range = Range::new(1.0, 2.0);
        for norm in NORMS {
            assert_eq!(norm.normalize(50.0, range), Some(1.0), "{norm:?}");
            assert_eq!(norm.normalize(0.5, range), Some(0.0), "{norm:?}");
        }
    }

    #[test]
    fn linear_midpoint() {
        assert_eq!(Norm::Linear.normalize(5.0, Range::new(0.0, 10.0)), Some(0.5));
    }

    #[test]
    fn log_midpoint() {
        let t = Norm::Log.normalize(10.0, Range::new(1.0, 100.0)).unwrap();
        assert!(close(t, 0.5));
    }

    #[test]
    fn log_masks_non_positive() {
        let range = Range::new(1.0, 100.0);
        assert_eq!(Norm::Log.normalize(0.0, range), None);
        assert_eq!(Norm::Log.normalize(-3.0, range), None);
        assert_eq!(Norm::Linear.normalize(f64::NAN, range), None);
    }

    #[test]
    fn symlog_is_symmetric() {
        let norm = Norm::SymLog { linthresh: 1.0 };
        let range = Range::new(-100.0, 100.0);
        assert!(close(norm.normalize(0.0, range).unwrap(), 0.5));
        let a = norm.normalize(20.0, range).unwrap();
        let b = norm.normalize(-20.0, range).unwrap();
        assert!(close(a - 0.5, 0.5 - b));
    }

    #[test]
    fn flat_range() {
        assert_eq!(Norm::Linear.normalize(3.0, Range::new(3.0, 3.0)), Some(0.0));
    }

    #[test]
    fn denormalize_inverts() {
        let range = Range::new(0.1, 10.0);
        for norm in NORMS {
            for v in [0.1, 0.3, 1.0, 4.2, 10.0] {
                let t = norm.normalize(v, range).unwrap();
                assert!(close(norm.denormalize(t, range), v), "{norm:?} at {v}");
            }
        }
    }

    #[test]
    fn validation() {
        assert!(Norm::Log.validate(Range::new(0.0, 1.0)).is_err());
        assert!(Norm::Log.validate(Range::new(0.5, 1.0)).is_ok());
        assert!(Norm::SymLog { linthresh: 0.0 }.validate(Range::new(-1.0, 1.0)).is_err());
        assert!(Norm::Power { gamma: -1.0 }.validate(Range::new(0.0, 1.0)).is_err());
        assert!(Norm::Linear.validate(Range::new(-1.0, 1.0)).is_ok());
    }
}
