use std::fmt::{self, Display, Formatter};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::{debug, instrument};

use crate::{
    common::range::Range,
    config::{Labels, PlotConfig},
    crop::{Crop, Extent},
    error::{Error, InputError},
    index::nearest_index,
    layout::Layout,
    Dir,
};

/// A 2D field cropped to its viewing window, with the color range and
/// slice positions resolved.
///
/// Rows of `data` run along the vertical axis, columns along the
/// horizontal axis. Everything is computed in [`FieldSlice::new`]; the
/// value is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSlice {
    data: Array2<f64>,
    h_axis: Array1<f64>,
    v_axis: Array1<f64>,
    extent: Extent,
    data_range: Range<f64>,
    value_range: Range<f64>,
    layout: Layout,
    labels: Labels,
    config: PlotConfig,
}

impl FieldSlice {
    #[instrument(skip_all, fields(shape = ?arr2d.dim()))]
    pub fn new(
        arr2d: ArrayView2<f64>,
        h_axis: ArrayView1<f64>,
        v_axis: ArrayView1<f64>,
        labels: Labels,
        config: PlotConfig,
    ) -> Result<Self, Error> {
        let (rows, cols) = arr2d.dim();
        if rows == 0 || cols == 0 {
            return Err(InputError::EmptyField { rows, cols }.into());
        }
        check_axis(Dir::Horizontal, h_axis, cols)?;
        check_axis(Dir::Vertical, v_axis, rows)?;

        let extent = config
            .extent
            .unwrap_or_else(|| Extent::of_axes(h_axis, v_axis));
        let Crop {
            data,
            h_axis,
            v_axis,
            extent,
            ..
        } = Crop::new(arr2d, h_axis, v_axis, extent)?;

        let data_range =
            Range::from_finite(data.iter().copied()).ok_or(InputError::NoFiniteData)?;
        let value_range = Range::new(
            config.vmin.unwrap_or(data_range.min),
            config.vmax.unwrap_or(data_range.max),
        );
        if value_range.min.is_nan() || value_range.max.is_nan() || value_range.min > value_range.max
        {
            return Err(Error::InvalidColorRange {
                vmin: value_range.min,
                vmax: value_range.max,
            });
        }
        config.norm.validate(value_range)?;

        let hslice_row = config
            .hslice_val
            .map(|value| nearest_index(v_axis.view(), value))
            .transpose()?;
        let vslice_col = config
            .vslice_val
            .map(|value| nearest_index(h_axis.view(), value))
            .transpose()?;
        let layout = Layout::select(hslice_row, vslice_col);

        debug!(
            cropped = ?data.dim(),
            ?value_range,
            %layout,
            "Prepared field slice"
        );

        Ok(Self {
            data,
            h_axis,
            v_axis,
            extent,
            data_range,
            value_range,
            layout,
            labels,
            config,
        })
    }

    pub fn data(&self) -> ArrayView2<f64> {
        self.data.view()
    }

    pub fn h_axis(&self) -> ArrayView1<f64> {
        self.h_axis.view()
    }

    pub fn v_axis(&self) -> ArrayView1<f64> {
        self.v_axis.view()
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Finite min/max of the cropped data.
    pub fn data_range(&self) -> Range<f64> {
        self.data_range
    }

    /// Color scale bounds, `vmin..=vmax`.
    pub fn value_range(&self) -> Range<f64> {
        self.value_range
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn hslice_index(&self) -> Option<usize> {
        self.layout.hslice_row()
    }

    pub fn vslice_index(&self) -> Option<usize> {
        self.layout.vslice_col()
    }

    /// Vertical coordinate the horizontal slice snapped to.
    pub fn hslice_coord(&self) -> Option<f64> {
        self.hslice_index().map(|row| self.v_axis[row])
    }

    /// Horizontal coordinate the vertical slice snapped to.
    pub fn vslice_coord(&self) -> Option<f64> {
        self.vslice_index().map(|col| self.h_axis[col])
    }

    /// The data row under the horizontal slice, paired with the horizontal axis.
    pub fn hslice_profile(&self) -> Option<(ArrayView1<f64>, ArrayView1<f64>)> {
        self.hslice_index()
            .map(|row| (self.h_axis.view(), self.data.row(row)))
    }

    /// The data column under the vertical slice, paired with the vertical axis.
    pub fn vslice_profile(&self) -> Option<(ArrayView1<f64>, ArrayView1<f64>)> {
        self.vslice_index()
            .map(|col| (self.v_axis.view(), self.data.column(col)))
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn show_colorbar(&self) -> bool {
        self.config.cbar
    }

    pub fn text(&self) -> &str {
        &self.config.text
    }
}

impl Display for FieldSlice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let nan = Range::new(f64::NAN, f64::NAN);
        let h = Range::from_iter_val(self.h_axis.iter().copied()).unwrap_or(nan);
        let v = Range::from_iter_val(self.v_axis.iter().copied()).unwrap_or(nan);
        write!(
            f,
            "extent=({:.3}, {:.3}, {:.3}, {:.3}); min, max = ({:.3}, {:.3})",
            h.min, h.max, v.min, v.max, self.data_range.min, self.data_range.max
        )
    }
}

fn check_axis(dir: Dir, axis: ArrayView1<f64>, expected: usize) -> Result<(), Error> {
    if axis.len() != expected {
        return Err(InputError::AxisLengthMismatch {
            axis: dir,
            expected,
            found: axis.len(),
        }
        .into());
    }

    if let Some(bad) = axis.iter().find(|x| !x.is_finite()) {
        return Err(InputError::NonFiniteCoordinate(*bad).into());
    }

    let increasing = axis.len() < 2 || axis[1] > axis[0];
    let broken = axis
        .windows(2)
        .into_iter()
        .position(|w| if increasing { w[1] <= w[0] } else { w[1] >= w[0] });
    match broken {
        Some(i) => Err(InputError::NonMonotonicAxis {
            axis: dir,
            index: i + 1,
        }
        .into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array};

    use super::*;
    use crate::norm::Norm;

    fn ramp() -> (Array2<f64>, Array1<f64>, Array1<f64>) {
        let field = Array::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f64);
        let axis = array![0.0, 1.0, 2.0, 3.0];
        (field, axis.clone(), axis)
    }

    fn build(config: PlotConfig) -> Result<FieldSlice, Error> {
        let (field, h, v) = ramp();
        FieldSlice::new(field.view(), h.view(), v.view(), Labels::default(), config)
    }

    #[test]
    fn single_panel_defaults() {
        let slice = build(PlotConfig::default()).unwrap();
        assert_eq!(slice.layout(), Layout::Single);
        assert_eq!(slice.value_range(), Range::new(0.0, 15.0));
        assert_eq!(slice.extent(), Extent::new(0.0, 3.0, 0.0, 3.0));
        assert_eq!(slice.hslice_profile(), None);
    }

    #[test]
    fn horizontal_slice() {
        let slice = build(PlotConfig::default().with_hslice(2.0)).unwrap();
        assert_eq!(slice.layout(), Layout::Horizontal { row: 2 });
        assert_eq!(slice.hslice_index(), Some(2));
        assert_eq!(slice.hslice_coord(), Some(2.0));

        let (coords, values) = slice.hslice_profile().unwrap();
        assert_eq!(coords, array![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(values, array![8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn vertical_slice() {
        let slice = build(PlotConfig::default().with_vslice(1.0)).unwrap();
        assert_eq!(slice.layout(), Layout::Vertical { col: 1 });
        let (coords, values) = slice.vslice_profile().unwrap();
        assert_eq!(coords, array![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(values, array![1.0, 5.0, 9.0, 13.0]);
    }

    #[test]
    fn both_slices() {
        let slice = build(PlotConfig::default().with_hslice(2.0).with_vslice(1.0)).unwrap();
        assert_eq!(slice.layout(), Layout::Both { row: 2, col: 1 });
        assert_eq!(slice.hslice_index(), Some(2));
        assert_eq!(slice.vslice_index(), Some(1));
    }

    #[test]
    fn out_of_range_slice_clamps() {
        let slice = build(PlotConfig::default().with_hslice(100.0).with_vslice(-7.0)).unwrap();
        assert_eq!(slice.hslice_index(), Some(3));
        assert_eq!(slice.vslice_index(), Some(0));
    }

    #[test]
    fn value_range_follows_crop() {
        let slice = build(PlotConfig::default().with_extent((1.0, 2.0, 1.0, 2.0))).unwrap();
        assert_eq!(slice.data(), array![[5.0, 6.0], [9.0, 10.0]]);
        assert_eq!(slice.value_range(), Range::new(5.0, 10.0));
    }

    #[test]
    fn slices_resolve_against_cropped_axes() {
        let slice = build(
            PlotConfig::default()
                .with_extent((1.0, 3.0, 1.0, 3.0))
                .with_hslice(2.0),
        )
        .unwrap();
        // Row 2 of the full field is row 1 of the crop
        assert_eq!(slice.hslice_index(), Some(1));
        let (_, values) = slice.hslice_profile().unwrap();
        assert_eq!(values, array![9.0, 10.0, 11.0]);
    }

    #[test]
    fn overrides_are_independent() {
        let slice = build(PlotConfig::default().with_vmax(100.0)).unwrap();
        assert_eq!(slice.value_range(), Range::new(0.0, 100.0));
        assert_eq!(slice.data_range(), Range::new(0.0, 15.0));

        let slice = build(PlotConfig::default().with_vmin(-1.0)).unwrap();
        assert_eq!(slice.value_range(), Range::new(-1.0, 15.0));
    }

    #[test]
    fn inverted_overrides() {
        let err = build(PlotConfig::default().with_vmin(20.0)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidColorRange {
                vmin: 20.0,
                vmax: 15.0
            }
        );
    }

    #[test]
    fn log_norm_needs_positive_vmin() {
        let err = build(PlotConfig::default().with_norm(Norm::Log)).unwrap_err();
        assert!(matches!(err, Error::InvalidNorm(_)));
        assert!(build(PlotConfig::default().with_norm(Norm::Log).with_vmin(1.0)).is_ok());
    }

    #[test]
    fn mismatched_axis() {
        let (field, _, v) = ramp();
        let h = array![0.0, 1.0, 2.0];
        let err = FieldSlice::new(
            field.view(),
            h.view(),
            v.view(),
            Labels::default(),
            PlotConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput(InputError::AxisLengthMismatch {
                axis: Dir::Horizontal,
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn empty_field() {
        let field = Array2::<f64>::zeros((0, 3));
        let h = array![0.0, 1.0, 2.0];
        let v = Array1::<f64>::zeros(0);
        let err = FieldSlice::new(
            field.view(),
            h.view(),
            v.view(),
            Labels::default(),
            PlotConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InputError::EmptyField { rows: 0, cols: 3 })
        ));
    }

    #[test]
    fn non_monotonic_axis() {
        let (field, h, _) = ramp();
        let v = array![0.0, 2.0, 1.0, 3.0];
        let err = FieldSlice::new(
            field.view(),
            h.view(),
            v.view(),
            Labels::default(),
            PlotConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput(InputError::NonMonotonicAxis {
                axis: Dir::Vertical,
                index: 2
            })
        );
    }

    #[test]
    fn nan_data_is_skipped() {
        let (mut field, h, v) = ramp();
        field[[0, 0]] = f64::NAN;
        field[[3, 3]] = f64::INFINITY;
        let slice = FieldSlice::new(
            field.view(),
            h.view(),
            v.view(),
            Labels::default(),
            PlotConfig::default(),
        )
        .unwrap();
        assert_eq!(slice.value_range(), Range::new(1.0, 14.0));
    }

    #[test]
    fn all_nan_data() {
        let (_, h, v) = ramp();
        let field = Array2::from_elem((4, 4), f64::NAN);
        let err = FieldSlice::new(
            field.view(),
            h.view(),
            v.view(),
            Labels::default(),
            PlotConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidInput(InputError::NoFiniteData));
    }

    #[test]
    fn summary() {
        let slice = build(PlotConfig::default().with_extent((1.0, 2.0, 0.0, 3.0))).unwrap();
        assert_eq!(
            slice.to_string(),
            "extent=(1.000, 2.000, 0.000, 3.000); min, max = (1.000, 14.000)"
        );
    }
}
