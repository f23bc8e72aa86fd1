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

//! Data half of a pseudocolor field plot with attached slice strips.
//!
//! [`FieldSlice`] crops a 2D field to a viewing window, works out the
//! color range and resolves the requested slice lines into row/column
//! indices. Drawing lives in `sliceplots-plotters`.

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub mod common;
pub mod config;
pub mod crop;
pub mod error;
pub mod field;
pub mod index;
pub mod layout;
pub mod norm;

pub use common::range::Range;
pub use config::{Colormap, Labels, LineStyle, PlotConfig, Rgb, SliceStyle};
pub use crop::{Crop, Extent};
pub use error::{Error, InputError};
pub use field::FieldSlice;
pub use index::{nearest_index, IndexWindow};
pub use layout::Layout;
pub use norm::Norm;

/// The two coordinate directions of a field.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    #[display(fmt = "horizontal")]
    Horizontal,
    #[display(fmt = "vertical")]
    Vertical,
}
