use derive_more::Constructor;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    common::range::Range,
    error::Error,
    index::{nearest_index, IndexWindow},
    Dir,
};

/// Bounding box in axis coordinates, in the `(xmin, xmax, ymin, ymax)` order.
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Extent {
    /// The full coordinate range of both axes.
    ///
    /// Empty axes yield a `NaN` extent, which the crop rejects.
    pub fn of_axes(h_axis: ArrayView1<f64>, v_axis: ArrayView1<f64>) -> Self {
        let nan = Range::new(f64::NAN, f64::NAN);
        let h = Range::from_iter_val(h_axis.iter().copied()).unwrap_or(nan);
        let v = Range::from_iter_val(v_axis.iter().copied()).unwrap_or(nan);
        Self::from_ranges(h, v)
    }

    pub fn from_ranges(h: Range<f64>, v: Range<f64>) -> Self {
        Self::new(h.min, h.max, v.min, v.max)
    }

    pub fn h_range(&self) -> Range<f64> {
        Range::new(self.xmin, self.xmax)
    }

    pub fn v_range(&self) -> Range<f64> {
        Range::new(self.ymin, self.ymax)
    }

    /// Restricts the extent to the given axis ranges.
    pub fn clamped_to(&self, h: Range<f64>, v: Range<f64>) -> Self {
        Self::new(
            h.clamp(self.xmin),
            h.clamp(self.xmax),
            v.clamp(self.ymin),
            v.clamp(self.ymax),
        )
    }
}

impl From<(f64, f64, f64, f64)> for Extent {
    fn from((xmin, xmax, ymin, ymax): (f64, f64, f64, f64)) -> Self {
        Self::new(xmin, xmax, ymin, ymax)
    }
}

/// A field cut down to a viewing window.
#[derive(Debug, Clone, PartialEq)]
pub struct Crop {
    pub data: Array2<f64>,
    pub h_axis: Array1<f64>,
    pub v_axis: Array1<f64>,
    pub extent: Extent,
    pub h_window: IndexWindow,
    pub v_window: IndexWindow,
}

impl Crop {
    /// Crops `field` (rows along `v_axis`, columns along `h_axis`) to `extent`.
    ///
    /// Each extent bound snaps to the nearest sample and the window keeps
    /// both snapped samples, so the full axis range returns the inputs
    /// unchanged. Shapes must already be validated by the caller.
    pub fn new(
        field: ArrayView2<f64>,
        h_axis: ArrayView1<f64>,
        v_axis: ArrayView1<f64>,
        extent: Extent,
    ) -> Result<Self, Error> {
        let h_window = window(Dir::Horizontal, h_axis, extent.h_range())?;
        let v_window = window(Dir::Vertical, v_axis, extent.v_range())?;
        debug!(?h_window, ?v_window, "Resolved crop windows");

        let data = field
            .slice_axis(Axis(0), v_window.slice())
            .slice_axis(Axis(1), h_window.slice())
            .to_owned();
        let h_axis_cropped = h_axis.slice_axis(Axis(0), h_window.slice()).to_owned();
        let v_axis_cropped = v_axis.slice_axis(Axis(0), v_window.slice()).to_owned();

        let h_full = Range::from_iter_val(h_axis.iter().copied()).unwrap_or(extent.h_range());
        let v_full = Range::from_iter_val(v_axis.iter().copied()).unwrap_or(extent.v_range());

        Ok(Self {
            data,
            h_axis: h_axis_cropped,
            v_axis: v_axis_cropped,
            extent: extent.clamped_to(h_full, v_full),
            h_window,
            v_window,
        })
    }
}

fn window(axis: Dir, coords: ArrayView1<f64>, range: Range<f64>) -> Result<IndexWindow, Error> {
    let degenerate = |first, last| Error::DegenerateCrop {
        axis,
        first,
        last,
        min: range.min,
        max: range.max,
    };

    if range.min.is_nan() || range.max.is_nan() || range.min >= range.max {
        return Err(degenerate(0, 0));
    }

    let window = IndexWindow::spanning(
        nearest_index(coords, range.min)?,
        nearest_index(coords, range.max)?,
    );
    if window.is_degenerate() {
        return Err(degenerate(window.first, window.last));
    }

    Ok(window)
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array};

    use super::*;

    fn field() -> (Array2<f64>, Array1<f64>, Array1<f64>) {
        let field = Array::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f64);
        let axis = array![0.0, 1.0, 2.0, 3.0];
        (field, axis.clone(), axis)
    }

    #[test]
    fn full_extent_is_identity() {
        let (field, h, v) = field();
        let extent = Extent::of_axes(h.view(), v.view());
        let crop = Crop::new(field.view(), h.view(), v.view(), extent).unwrap();

        assert_eq!(crop.data, field);
        assert_eq!(crop.h_axis, h);
        assert_eq!(crop.v_axis, v);
        assert_eq!(crop.extent, Extent::new(0.0, 3.0, 0.0, 3.0));
    }

    #[test]
    fn crops_to_window() {
        let (field, h, v) = field();
        let crop = Crop::new(
            field.view(),
            h.view(),
            v.view(),
            Extent::new(0.9, 2.2, 2.0, 3.0),
        )
        .unwrap();

        assert_eq!(crop.h_axis, array![1.0, 2.0]);
        assert_eq!(crop.v_axis, array![2.0, 3.0]);
        assert_eq!(crop.data, array![[9.0, 10.0], [13.0, 14.0]]);
        assert_eq!(crop.h_window, IndexWindow { first: 1, last: 2 });
    }

    #[test]
    fn extent_is_clamped_to_axes() {
        let (field, h, v) = field();
        let crop = Crop::new(
            field.view(),
            h.view(),
            v.view(),
            Extent::new(-5.0, 10.0, 1.0, 2.0),
        )
        .unwrap();

        assert_eq!(crop.extent, Extent::new(0.0, 3.0, 1.0, 2.0));
        assert_eq!(crop.data.dim(), (2, 4));
    }

    #[test]
    fn decreasing_axis() {
        let (field, _, v) = field();
        let h = array![3.0, 2.0, 1.0, 0.0];
        let crop = Crop::new(
            field.view(),
            h.view(),
            v.view(),
            Extent::new(0.0, 1.0, 0.0, 3.0),
        )
        .unwrap();

        assert_eq!(crop.h_axis, array![1.0, 0.0]);
        assert_eq!(crop.data.column(0), array![2.0, 6.0, 10.0, 14.0]);
    }

    #[test]
    fn inverted_extent() {
        let (field, h, v) = field();
        let err = Crop::new(
            field.view(),
            h.view(),
            v.view(),
            Extent::new(2.0, 1.0, 0.0, 3.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateCrop {
                axis: Dir::Horizontal,
                ..
            }
        ));
    }

    #[test]
    fn single_sample_window() {
        let (field, h, v) = field();
        let err = Crop::new(
            field.view(),
            h.view(),
            v.view(),
            Extent::new(0.0, 3.0, 1.1, 1.3),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateCrop {
                axis: Dir::Vertical,
                first: 1,
                last: 1,
                ..
            }
        ));
    }
}
