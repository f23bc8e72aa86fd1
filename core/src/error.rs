use miette::Diagnostic;
use thiserror::Error;

use crate::Dir;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    #[diagnostic(code(sliceplots::invalid_input))]
    InvalidInput(#[from] InputError),

    #[error("Crop window on the {axis} axis is empty ({first}..={last}, requested {min} to {max})")]
    #[diagnostic(
        code(sliceplots::degenerate_crop),
        help("The extent must span at least two samples on each axis, with min < max")
    )]
    DegenerateCrop {
        axis: Dir,
        first: usize,
        last: usize,
        min: f64,
        max: f64,
    },

    #[error("Color range is inverted (vmin {vmin} > vmax {vmax})")]
    #[diagnostic(code(sliceplots::invalid_color_range))]
    InvalidColorRange { vmin: f64, vmax: f64 },

    #[error("Invalid norm: {0}")]
    #[diagnostic(code(sliceplots::invalid_norm))]
    InvalidNorm(String),

    #[error("Unknown color '{0}'")]
    #[diagnostic(
        code(sliceplots::unknown_color),
        help("Use a named color like 'firebrick' or a hex code like '#b22222'")
    )]
    UnknownColor(String),

    #[error("Unknown colormap '{0}'")]
    #[diagnostic(code(sliceplots::unknown_colormap))]
    UnknownColormap(String),

    #[error("Unknown line style '{0}'")]
    #[diagnostic(code(sliceplots::unknown_line_style), help("Expected one of '-', '--', ':'"))]
    UnknownLineStyle(String),
}

/// Caller errors in the arrays handed to the constructor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("field is empty ({rows}x{cols})")]
    EmptyField { rows: usize, cols: usize },
    #[error("axis is empty")]
    EmptyAxis,
    #[error("{axis} axis has {found} values, the field needs {expected}")]
    AxisLengthMismatch {
        axis: Dir,
        expected: usize,
        found: usize,
    },
    #[error("{axis} axis is not strictly monotonic at index {index}")]
    NonMonotonicAxis { axis: Dir, index: usize },
    #[error("coordinate {0} is not finite")]
    NonFiniteCoordinate(f64),
    #[error("cropped field contains no finite values")]
    NoFiniteData,
}
