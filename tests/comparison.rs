//! Candidate vs reference comparison
//!
//! Candidates here are the same closed-form fields the reference was
//! sampled from, so every correctly scaled and oriented comparison has a
//! vanishing error.

use approx::assert_relative_eq;
use fieldref::comparison::{Comparator, ErrorMode};
use fieldref::error::{ErrorKind, FieldError};
use fieldref::external::{CandidateField, GridOrientation};
use fieldref::fields::FieldName;
use fieldref::interpolation::ScatteredMethod;
use fieldref::reference::{ReferenceConfiguration, ReferenceModel, ScatteredDataset};
use ndarray::Array2;
use std::cell::RefCell;

mod common;
use common::{build_model, irregular_positions, lattice_positions, planar_dataset, LinearSeries, PlanarField};

const LENGTH: f64 = 0.1;
const TIMESCALE: f64 = 3600.0;

fn planar_model(field: &PlanarField, voltage: &LinearSeries) -> ReferenceModel {
    let times = vec![0.0, 1200.0, 2400.0, 3600.0];
    let series: Vec<f64> = times.iter().map(|t| voltage.value(t / TIMESCALE)).collect();

    let dataset = planar_dataset(field, irregular_positions(30), times, TIMESCALE)
        .series(FieldName::TerminalVoltage, series)
        .build()
        .unwrap();

    let config = ReferenceConfiguration::default().with_method(ScatteredMethod::Linear);
    build_model(&dataset, &config, LENGTH, TIMESCALE).unwrap()
}

// =================================================================================================
// Spatial fields
// =================================================================================================

#[test]
fn test_matching_candidate_has_no_error() {
    let field = PlanarField::new(0.5, -0.2, 0.4, 0.3);
    let model = planar_model(&field, &LinearSeries::new(4.2, -0.5));

    let comparison = Comparator::new(&model, ErrorMode::Absolute)
        .compare_field(FieldName::NegativeCollectorPotential, &field, 1800.0)
        .unwrap();

    assert_eq!(comparison.error.dim(), model.grid().shape());
    assert_eq!(comparison.y, model.grid().y());
    assert_eq!(comparison.time, 1800.0);

    let summary = comparison.summary();
    assert_eq!(summary.non_finite_count, 0);
    assert!(summary.max < 1e-9, "max error {}", summary.max);
}

#[test]
fn test_offset_candidate() {
    let field = PlanarField::new(1.0, 1.0, 1.0, 0.0);
    let model = planar_model(&field, &LinearSeries::new(4.2, -0.5));

    let shifted = PlanarField { offset: 1.5, ..field };
    let absolute = Comparator::new(&model, ErrorMode::Absolute)
        .compare_field(FieldName::NegativeCollectorPotential, &shifted, 600.0)
        .unwrap();
    for &e in absolute.error.iter() {
        assert_relative_eq!(e, 0.5, epsilon = 1e-9);
    }

    let relative = Comparator::new(&model, ErrorMode::Relative)
        .compare_field(FieldName::NegativeCollectorPotential, &shifted, 600.0)
        .unwrap();
    for ((&e, &a), &b) in relative.error.iter().zip(&relative.candidate).zip(&relative.reference) {
        assert_relative_eq!(e, ((a - b) / b).abs(), epsilon = 1e-12);
    }
}

#[test]
fn test_candidate_receives_dimensionless_coordinates() {
    let field = PlanarField::new(0.0, 1.0, 0.0, 0.0);
    let model = planar_model(&field, &LinearSeries::new(4.2, -0.5));
    let seen = RefCell::new(None);

    let candidate = |y: &[f64], z: &[f64], t: f64| {
        *seen.borrow_mut() = Some((y.to_vec(), z.to_vec(), t));
        Array2::<f64>::zeros((y.len(), z.len()))
    };
    Comparator::new(&model, ErrorMode::Absolute)
        .compare_field(FieldName::NegativeCollectorPotential, &candidate, 900.0)
        .unwrap();

    let (y, z, t) = seen.into_inner().unwrap();
    assert_relative_eq!(t, 0.25);
    assert_relative_eq!(*y.last().unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(*z.last().unwrap(), 1.0, epsilon = 1e-12);
    assert_eq!((z.len(), y.len()), model.grid().shape());
}

#[test]
fn test_zy_oriented_candidate() {
    let field = PlanarField::new(0.2, 0.7, -1.1, 0.0);
    let model = planar_model(&field, &LinearSeries::new(4.2, -0.5));

    // same values, already laid out [z, y]
    let transposed = |y: &[f64], z: &[f64], t: f64| {
        Array2::from_shape_fn((z.len(), y.len()), |(iz, iy)| field.value(y[iy], z[iz], t))
    };
    let candidate = transposed.with_orientation(GridOrientation::ZY);

    let comparison = Comparator::new(&model, ErrorMode::Absolute)
        .compare_field(FieldName::NegativeCollectorPotential, &candidate, 3600.0)
        .unwrap();
    assert!(comparison.summary().max < 1e-9);
}

#[test]
fn test_wrong_candidate_shape() {
    let field = PlanarField::new(0.0, 1.0, 1.0, 0.0);
    let model = planar_model(&field, &LinearSeries::new(4.2, -0.5));
    let (nz, ny) = model.grid().shape();

    // [z, y] array declared as [y, z]
    let candidate = |y: &[f64], z: &[f64], _t: f64| Array2::<f64>::zeros((z.len(), y.len()));
    let error = Comparator::new(&model, ErrorMode::Absolute)
        .compare_field(FieldName::NegativeCollectorPotential, &candidate, 0.0)
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ShapeMismatch);
    assert!(matches!(
        error,
        FieldError::ShapeMismatch { ref expected, ref actual, .. }
            if expected == &vec![ny, nz] && actual == &vec![nz, ny]
    ));
}

#[test]
fn test_relative_error_at_zero_reference() {
    let (y, z) = lattice_positions(3);
    let dataset = ScatteredDataset::builder(vec![0.0, 1.0], y, z)
        .spatial(FieldName::CurrentDensity, Array2::zeros((9, 2)))
        .build()
        .unwrap();
    let model = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 1.0).unwrap();
    let nodes = model.grid().len();

    let ones = |y: &[f64], z: &[f64], _t: f64| Array2::from_elem((y.len(), z.len()), 1.0);
    let zeros = |y: &[f64], z: &[f64], _t: f64| Array2::<f64>::zeros((y.len(), z.len()));
    let comparator = Comparator::new(&model, ErrorMode::Relative);

    let comparison = comparator.compare_field(FieldName::CurrentDensity, &ones, 0.5).unwrap();
    assert!(comparison.error.iter().all(|e| e.is_infinite()));
    assert_eq!(comparison.summary().non_finite_count, nodes);
    assert!(comparison.summary().max.is_nan());

    let comparison = comparator.compare_field(FieldName::CurrentDensity, &zeros, 0.5).unwrap();
    assert!(comparison.error.iter().all(|e| e.is_nan()));

    let absolute = Comparator::new(&model, ErrorMode::Absolute)
        .compare_field(FieldName::CurrentDensity, &ones, 0.5)
        .unwrap();
    assert_relative_eq!(absolute.summary().max, 1.0);
}

#[test]
fn test_field_comparison_errors() {
    let field = PlanarField::new(0.0, 1.0, 1.0, 0.0);
    let model = planar_model(&field, &LinearSeries::new(4.2, -0.5));
    let comparator = Comparator::new(&model, ErrorMode::Absolute);

    let error = comparator.compare_field(FieldName::NegativeCollectorPotential, &field, 3601.0).unwrap_err();
    assert!(matches!(error, FieldError::TimeOutOfRange { .. }));

    let error = comparator.compare_field(FieldName::Temperature, &field, 0.0).unwrap_err();
    assert!(matches!(error, FieldError::MissingField(FieldName::Temperature)));

    let error = comparator.compare_field(FieldName::TerminalVoltage, &field, 0.0).unwrap_err();
    assert!(matches!(error, FieldError::InvalidConfiguration { .. }));
}

// =================================================================================================
// Series
// =================================================================================================

#[test]
fn test_series_scaled_by_timescale() {
    let voltage = LinearSeries::new(4.2, -0.6);
    let model = planar_model(&PlanarField::new(0.0, 0.0, 0.0, 0.0), &voltage);

    let times = [0.0, 600.0, 1800.0, 3600.0];
    let comparison = Comparator::new(&model, ErrorMode::Relative)
        .compare_series(FieldName::TerminalVoltage, &voltage, &times)
        .unwrap();

    assert_eq!(comparison.times, times.to_vec());
    assert_relative_eq!(comparison.candidate[2], 3.9, epsilon = 1e-12);
    assert!(comparison.summary().max < 1e-12);

    // a candidate evaluated in seconds would be far off
    let unscaled = |t: &[f64]| t.iter().map(|&t| voltage.value(t * TIMESCALE)).collect::<Vec<f64>>();
    let comparison = Comparator::new(&model, ErrorMode::Relative)
        .compare_series(FieldName::TerminalVoltage, &unscaled, &times)
        .unwrap();
    assert!(comparison.summary().max > 1.0);
}

#[test]
fn test_series_comparison_errors() {
    let voltage = LinearSeries::new(4.2, -0.6);
    let model = planar_model(&PlanarField::new(0.0, 0.0, 0.0, 0.0), &voltage);
    let comparator = Comparator::new(&model, ErrorMode::Absolute);

    let short = |_t: &[f64]| vec![4.0];
    let error = comparator.compare_series(FieldName::TerminalVoltage, &short, &[0.0, 60.0]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ShapeMismatch);

    let error = comparator.compare_series(FieldName::TerminalVoltage, &voltage, &[0.0, 7200.0]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DataRange);

    let error = comparator
        .compare_series(FieldName::VolumeAveragedTemperature, &voltage, &[0.0])
        .unwrap_err();
    assert!(matches!(error, FieldError::MissingField(FieldName::VolumeAveragedTemperature)));

    let error = comparator
        .compare_series(FieldName::NegativeCollectorPotential, &voltage, &[0.0])
        .unwrap_err();
    assert!(matches!(error, FieldError::InvalidConfiguration { .. }));
}
