//! Reference model construction and queries
//!
//! These tests build models from datasets with known values and check the
//! gridded reference against them: exactness at the sample positions,
//! linear reproduction, time interpolation and every fatal build error.

use approx::assert_relative_eq;
use fieldref::error::{ErrorKind, FieldError};
use fieldref::external::{EdgeMesh, ParameterValues};
use fieldref::fields::{FieldName, FieldValue};
use fieldref::interpolation::ScatteredMethod;
use fieldref::reference::{
    CoordinateUnits, DatasetRecord, ReferenceConfiguration, ReferenceModel, ScatteredDataset,
};
use ndarray::{Array2, ArrayD, IxDyn};

mod common;
use common::{
    assert_arrays_close, build_model, irregular_positions, lattice_positions, planar_dataset, MissingScales,
    PlanarField,
};

fn grid_values(model: &ReferenceModel, field: FieldName, t: f64) -> Array2<f64> {
    model.evaluate(field, t).unwrap().into_grid().unwrap()
}

/// Exact planar values on the model grid, `[z, y]`
fn expected_grid(model: &ReferenceModel, field: &PlanarField, t: f64) -> Array2<f64> {
    let scales = model.scales();
    let y = model.grid().dimensionless_y(scales);
    let z = model.grid().dimensionless_z(scales);
    let t = scales.to_dimensionless_time(t);
    Array2::from_shape_fn((z.len(), y.len()), |(iz, iy)| field.value(y[iy], z[iz], t))
}

// =================================================================================================
// Values
// =================================================================================================

#[test]
fn test_exact_at_sample_positions() {
    // 3 × 3 lattice whose positions coincide with the 3 × 3 mesh edges
    let (y, z) = lattice_positions(3);
    let times = vec![0.0, 60.0, 120.0];
    let samples = Array2::from_shape_fn((9, 3), |(k, i)| 300.0 + (3.0 * k as f64).sin() + i as f64);

    let dataset = ScatteredDataset::builder(times, y, z)
        .spatial(FieldName::Temperature, samples.clone())
        .build()
        .unwrap();

    let model = ReferenceModel::build(
        &dataset,
        &EdgeMesh::uniform("current collector", 1.0, 1.0, 3, 3),
        &ParameterValues::new(0.2, 3600.0),
        &ReferenceConfiguration::default(),
    )
    .unwrap();

    assert_eq!(model.grid().shape(), (3, 3));
    assert_eq!(model.outside_nodes(), 0);

    for (i, &t) in [0.0, 60.0, 120.0].iter().enumerate() {
        let grid = grid_values(&model, FieldName::Temperature, t);
        for iz in 0..3 {
            for iy in 0..3 {
                assert_relative_eq!(grid[[iz, iy]], samples[[iz * 3 + iy, i]], epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_time_midpoint_is_average() {
    let (y, z) = lattice_positions(3);
    let samples = Array2::from_shape_fn((9, 3), |(k, i)| k as f64 * [1.0, 3.0, -2.0][i]);

    let dataset = ScatteredDataset::builder(vec![0.0, 1.0, 2.0], y, z)
        .spatial(FieldName::CurrentDensity, samples)
        .build()
        .unwrap();
    let model = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 1.0).unwrap();

    let start = grid_values(&model, FieldName::CurrentDensity, 0.0);
    let end = grid_values(&model, FieldName::CurrentDensity, 1.0);
    let middle = grid_values(&model, FieldName::CurrentDensity, 0.5);

    let average = (&start + &end) / 2.0;
    assert_arrays_close(middle.view(), average.view(), 1e-9, "Midpoint");
}

#[test]
fn test_clough_tocher_reproduces_planes() {
    let field = PlanarField::new(1.0, 0.5, -0.3, 0.1);
    let dataset = planar_dataset(&field, irregular_positions(40), vec![0.0, 1800.0, 3600.0, 5400.0], 3600.0)
        .build()
        .unwrap();

    let model = build_model(&dataset, &ReferenceConfiguration::default(), 0.2, 3600.0).unwrap();
    assert_eq!(model.method_name(), "Clough-Tocher");

    for t in [0.0, 900.0, 5400.0] {
        let actual = grid_values(&model, FieldName::NegativeCollectorPotential, t);
        let expected = expected_grid(&model, &field, t);
        assert_arrays_close(actual.view(), expected.view(), 1e-4, "Clough-Tocher plane");
    }
}

#[test]
fn test_linear_method_reproduces_planes() {
    let field = PlanarField::new(-0.2, 2.0, 1.0, -0.5);
    let dataset = planar_dataset(&field, irregular_positions(25), vec![0.0, 100.0, 200.0], 100.0)
        .build()
        .unwrap();

    let config = ReferenceConfiguration::default().with_method(ScatteredMethod::Linear);
    let model = build_model(&dataset, &config, 0.05, 100.0).unwrap();
    assert_eq!(model.method_name(), "Linear");

    let actual = grid_values(&model, FieldName::NegativeCollectorPotential, 150.0);
    let expected = expected_grid(&model, &field, 150.0);
    assert_arrays_close(actual.view(), expected.view(), 1e-9, "Linear plane");
}

#[test]
fn test_dimensional_scatter_units() {
    let length = 0.2;
    let field = PlanarField::new(0.0, 1.0, 1.0, 0.0);

    // metres, not multiples of L
    let (y, z) = lattice_positions(4);
    let y: Vec<f64> = y.iter().map(|v| v * length).collect();
    let z: Vec<f64> = z.iter().map(|v| v * length).collect();
    let samples = Array2::from_shape_fn((16, 2), |(k, _)| field.value(y[k] / length, z[k] / length, 0.0));

    let dataset = ScatteredDataset::builder(vec![0.0, 10.0], y, z)
        .spatial(FieldName::NegativeCollectorPotential, samples)
        .build()
        .unwrap();

    let config = ReferenceConfiguration::default()
        .with_method(ScatteredMethod::Linear)
        .with_scatter_units(CoordinateUnits::Dimensional);
    let model = build_model(&dataset, &config, length, 10.0).unwrap();

    assert_eq!(model.outside_nodes(), 0);
    let actual = grid_values(&model, FieldName::NegativeCollectorPotential, 5.0);
    let expected = expected_grid(&model, &field, 5.0);
    assert_arrays_close(actual.view(), expected.view(), 1e-9, "Dimensional scatter");
}

#[test]
fn test_nodes_outside_hull_are_nan() {
    // scatter covers the lower half of the mesh only
    let (y, z) = lattice_positions(3);
    let z: Vec<f64> = z.iter().map(|v| v * 0.5).collect();
    let dataset = ScatteredDataset::builder(vec![0.0, 1.0], y, z)
        .spatial(FieldName::Temperature, Array2::from_elem((9, 2), 298.15))
        .build()
        .unwrap();

    let model = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 1.0).unwrap();

    // mesh z ticks: 0, 0.25, 0.5, 0.75, 1
    assert_eq!(model.outside_nodes(), 2 * 6);

    let grid = grid_values(&model, FieldName::Temperature, 0.5);
    for iz in 0..5 {
        for iy in 0..6 {
            if iz <= 2 {
                assert_relative_eq!(grid[[iz, iy]], 298.15, epsilon = 1e-9);
            } else {
                assert!(grid[[iz, iy]].is_nan());
            }
        }
    }
}

#[test]
fn test_explicit_grid_ticks() {
    let field = PlanarField::new(0.0, 1.0, 0.0, 0.0);
    let dataset = planar_dataset(&field, lattice_positions(3), vec![0.0, 1.0], 1.0).build().unwrap();

    // dimensional ticks; L = 2 so the scatter spans [0, 2]
    let config = ReferenceConfiguration::default()
        .with_method(ScatteredMethod::Linear)
        .with_grid(vec![0.0, 0.5, 1.0, 1.5], vec![1.0])
        .with_mesh_domain("unused");
    let model = build_model(&dataset, &config, 2.0, 1.0).unwrap();

    assert_eq!(model.grid().shape(), (1, 4));
    let grid = grid_values(&model, FieldName::NegativeCollectorPotential, 0.0);
    for (iy, expected) in [0.0, 0.25, 0.5, 0.75].into_iter().enumerate() {
        assert_relative_eq!(grid[[0, iy]], expected, epsilon = 1e-9);
    }
}

#[test]
fn test_series_field() {
    let (y, z) = lattice_positions(3);
    let dataset = ScatteredDataset::builder(vec![0.0, 600.0, 1200.0], y, z)
        .series(FieldName::TerminalVoltage, vec![4.2, 4.0, 3.9])
        .build()
        .unwrap();

    let model = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 3600.0).unwrap();

    assert_eq!(model.available_fields(), vec![FieldName::TerminalVoltage]);
    assert!(!model.contains(FieldName::Temperature));

    match model.evaluate(FieldName::TerminalVoltage, 900.0).unwrap() {
        FieldValue::Scalar(v) => assert_relative_eq!(v, 3.95, epsilon = 1e-12),
        other => panic!("expected a scalar, got {other:?}"),
    }
    assert_relative_eq!(
        model.evaluate(FieldName::TerminalVoltage, 1200.0).unwrap().try_as_scalar().unwrap(),
        3.9
    );
}

#[test]
fn test_from_record() {
    let (y, z) = lattice_positions(3);
    let mut record = DatasetRecord {
        time: vec![0.0, 1.0],
        y,
        z,
        ..Default::default()
    };
    record.fields.insert("voltage".to_string(), ArrayD::from_elem(IxDyn(&[2]), 4.0));
    record.fields.insert("phi_s_cp".to_string(), ArrayD::from_elem(IxDyn(&[9, 2]), 4.1));

    let dataset = ScatteredDataset::from_record(record.clone()).unwrap();
    let model = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 1.0).unwrap();
    assert_eq!(
        model.available_fields(),
        vec![FieldName::TerminalVoltage, FieldName::PositiveCollectorPotential]
    );

    record.fields.insert("pressure".to_string(), ArrayD::zeros(IxDyn(&[2])));
    let error = ScatteredDataset::from_record(record).unwrap_err();
    assert!(matches!(error, FieldError::UnknownField(ref key) if key == "pressure"));
}

// =================================================================================================
// Query errors
// =================================================================================================

#[test]
fn test_time_out_of_range() {
    let field = PlanarField::new(1.0, 0.0, 0.0, 1.0);
    let dataset = planar_dataset(&field, lattice_positions(3), vec![0.0, 60.0, 120.0], 60.0)
        .build()
        .unwrap();
    let model = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 60.0).unwrap();

    for t in [-1.0, 120.5, f64::NAN] {
        let error = model.evaluate(FieldName::NegativeCollectorPotential, t).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DataRange);
    }

    let error = model.evaluate(FieldName::NegativeCollectorPotential, 121.0).unwrap_err();
    assert!(matches!(
        error,
        FieldError::TimeOutOfRange { min, max, .. } if min == 0.0 && max == 120.0
    ));
}

#[test]
fn test_missing_field() {
    let field = PlanarField::new(1.0, 0.0, 0.0, 0.0);
    let dataset = planar_dataset(&field, lattice_positions(3), vec![0.0, 1.0], 1.0).build().unwrap();
    let model = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 1.0).unwrap();

    let error = model.evaluate(FieldName::Temperature, 0.5).unwrap_err();
    assert!(matches!(error, FieldError::MissingField(FieldName::Temperature)));
}

// =================================================================================================
// Build errors
// =================================================================================================

#[test]
fn test_zero_timescale() {
    let dataset = planar_dataset(&PlanarField::new(0.0, 1.0, 1.0, 0.0), lattice_positions(3), vec![0.0, 1.0], 1.0)
        .build()
        .unwrap();

    let error = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 0.0).unwrap_err();
    assert!(matches!(error, FieldError::InvalidScale { .. }));
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_unavailable_timescale() {
    let dataset = planar_dataset(&PlanarField::new(0.0, 1.0, 1.0, 0.0), lattice_positions(3), vec![0.0, 1.0], 1.0)
        .build()
        .unwrap();

    let error = ReferenceModel::build(
        &dataset,
        &EdgeMesh::uniform("current collector", 1.0, 1.0, 3, 3),
        &MissingScales { length: 0.1 },
        &ReferenceConfiguration::default(),
    )
    .unwrap_err();
    assert!(matches!(error, FieldError::ScaleUnavailable { parameter: "tau_discharge" }));
}

#[test]
fn test_unknown_mesh_domain() {
    let dataset = planar_dataset(&PlanarField::new(0.0, 1.0, 1.0, 0.0), lattice_positions(3), vec![0.0, 1.0], 1.0)
        .build()
        .unwrap();

    let config = ReferenceConfiguration::default().with_mesh_domain("separator");
    let error = build_model(&dataset, &config, 1.0, 1.0).unwrap_err();
    assert!(matches!(error, FieldError::MeshUnavailable { ref domain, .. } if domain == "separator"));
}

#[test]
fn test_two_points_are_insufficient() {
    let dataset = ScatteredDataset::builder(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, 1.0])
        .spatial(FieldName::Temperature, Array2::zeros((2, 2)))
        .build()
        .unwrap();

    let error = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 1.0).unwrap_err();
    assert!(matches!(error, FieldError::InsufficientData { .. }));
}

#[test]
fn test_collinear_points_are_insufficient() {
    let dataset = ScatteredDataset::builder(
        vec![0.0, 1.0],
        vec![0.0, 0.25, 0.5, 1.0],
        vec![0.0, 0.25, 0.5, 1.0],
    )
    .spatial(FieldName::Temperature, Array2::zeros((4, 2)))
    .build()
    .unwrap();

    let error = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 1.0).unwrap_err();
    assert!(matches!(error, FieldError::InsufficientData { .. }));
}

#[test]
fn test_series_only_ignores_degenerate_positions() {
    let dataset = ScatteredDataset::builder(
        vec![0.0, 600.0, 1200.0],
        vec![0.0, 0.5, 1.0],
        vec![0.0, 0.5, 1.0],
    )
    .series(FieldName::TerminalVoltage, vec![4.2, 4.0, 3.9])
    .build()
    .unwrap();

    let model = build_model(&dataset, &ReferenceConfiguration::default(), 1.0, 3600.0).unwrap();

    assert_eq!(model.outside_nodes(), 0);
    assert_eq!(model.method_name(), "Clough-Tocher");
    assert_relative_eq!(
        model.evaluate(FieldName::TerminalVoltage, 300.0).unwrap().try_as_scalar().unwrap(),
        4.1,
        epsilon = 1e-12
    );
}

#[test]
fn test_negative_length() {
    let dataset = planar_dataset(&PlanarField::new(0.0, 1.0, 1.0, 0.0), lattice_positions(3), vec![0.0, 1.0], 1.0)
        .build()
        .unwrap();

    let error = build_model(&dataset, &ReferenceConfiguration::default(), -1.0, 1.0).unwrap_err();
    assert!(matches!(error, FieldError::InvalidScale { parameter: "L_z", .. }));
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_invalid_gradient_tolerance() {
    let dataset = planar_dataset(&PlanarField::new(0.0, 1.0, 1.0, 0.0), lattice_positions(3), vec![0.0, 1.0], 1.0)
        .build()
        .unwrap();

    let config = ReferenceConfiguration::clough_tocher(-1.0, 100);
    let error = build_model(&dataset, &config, 1.0, 1.0).unwrap_err();
    assert!(matches!(error, FieldError::InvalidConfiguration { .. }));
}
