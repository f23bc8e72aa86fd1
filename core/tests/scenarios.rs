use ndarray::{array, Array, Array1, Array2};
use sliceplots_core::{Error, FieldSlice, InputError, Labels, Layout, PlotConfig, Range};

fn ramp() -> (Array2<f64>, Array1<f64>, Array1<f64>) {
    let field = Array::from_shape_fn((4, 4), |(row, col)| (row * 4 + col) as f64);
    let axis = array![0.0, 1.0, 2.0, 3.0];
    (field, axis.clone(), axis)
}

fn build(config: PlotConfig) -> Result<FieldSlice, Error> {
    let (field, h, v) = ramp();
    FieldSlice::new(
        field.view(),
        h.view(),
        v.view(),
        Labels::new("x", "y", "z"),
        config,
    )
}

#[test]
fn single_panel() {
    let slice = build(PlotConfig::default()).unwrap();
    assert_eq!(slice.layout(), Layout::Single);
    assert_eq!(slice.value_range(), Range::new(0.0, 15.0));
    assert_eq!(slice.labels().z, "z");
}

#[test]
fn horizontal_strip() {
    let slice = build(PlotConfig::default().with_hslice(2.0)).unwrap();
    assert_eq!(slice.layout(), Layout::Horizontal { row: 2 });

    let (coords, values) = slice.hslice_profile().unwrap();
    assert_eq!(values, array![8.0, 9.0, 10.0, 11.0]);
    assert_eq!(coords, array![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn three_panels() {
    let slice = build(PlotConfig::default().with_hslice(2.0).with_vslice(1.0)).unwrap();
    assert_eq!(slice.layout(), Layout::Both { row: 2, col: 1 });
    assert_eq!(slice.layout().panel_count(), 3);
}

#[test]
fn out_of_range_slice() {
    let slice = build(PlotConfig::default().with_hslice(100.0)).unwrap();
    assert_eq!(slice.hslice_index(), Some(3));
}

#[test]
fn full_extent_round_trip() {
    let (field, h, v) = ramp();
    let slice = build(PlotConfig::default().with_extent((0.0, 3.0, 0.0, 3.0))).unwrap();
    assert_eq!(slice.data(), field);
    assert_eq!(slice.h_axis(), h);
    assert_eq!(slice.v_axis(), v);
}

#[test]
fn mismatched_axis() {
    let (field, _, v) = ramp();
    let h = array![0.0, 1.0];
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
        Error::InvalidInput(InputError::AxisLengthMismatch { .. })
    ));
}

#[test]
fn degenerate_crop() {
    let err = build(PlotConfig::default().with_extent((3.0, 0.0, 0.0, 3.0))).unwrap_err();
    assert!(matches!(err, Error::DegenerateCrop { .. }));
}
