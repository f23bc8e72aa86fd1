// #![warn(clippy::pedantic)]

// #![warn(clippy::nursery)]
// #![warn(clippy::cargo)]
#![warn(clippy::complexity)]
#![warn(clippy::correctness)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![cfg_attr(not(test), warn(clippy::unwrap_used))]
#![cfg_attr(not(test), warn(clippy::expect_used))]

//! Renders a [`sliceplots_core::FieldSlice`] with `plotters`.
//!
//! ```no_run
//! use ndarray::Array;
//! use sliceplots_core::{Labels, PlotConfig};
//! use sliceplots_plotters::FieldSlicePlot;
//!
//! let field = Array::from_shape_fn((64, 64), |(r, c)| (r as f64 * 0.1).sin() * c as f64);
//! let axis = Array::linspace(0.0, 1.0, 64);
//! let plot = FieldSlicePlot::new(
//!     field.view(),
//!     axis.view(),
//!     axis.view(),
//!     Labels::new("x", "y", "E"),
//!     PlotConfig::default().with_hslice(0.5),
//! )?;
//! let svg = plot.to_svg()?;
//! # Ok::<(), sliceplots_plotters::Error>(())
//! ```

pub mod clip;
pub mod colors;
mod draw;
pub mod error;
pub mod figure;
pub mod grid;
pub mod stroke;

pub use error::Error;
pub use figure::{FieldSlicePlot, Figure};
