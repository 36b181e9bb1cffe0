//! Helper functions for integration tests

use fieldref::external::{EdgeMesh, ParameterValues};
use fieldref::fields::FieldName;
use fieldref::reference::{ReferenceConfiguration, ReferenceModel, ScatteredDataset, ScatteredDatasetBuilder};
use ndarray::{Array2, ArrayView2};

use super::mock_models::PlanarField;

/// Mesh domain used by every helper
pub const DOMAIN: &str = "current collector";

/// Uniform `n × n` lattice on the unit square, z-major
pub fn lattice_positions(n: usize) -> (Vec<f64>, Vec<f64>) {
    let ticks: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();

    let y = ticks.iter().flat_map(|_| ticks.iter().copied()).collect();
    let z = ticks.iter().flat_map(|&z| std::iter::repeat_n(z, n)).collect();
    (y, z)
}

/// Quasi-random points on the unit square, corners included
pub fn irregular_positions(count: usize) -> (Vec<f64>, Vec<f64>) {
    // R2 low-discrepancy sequence
    let g = 1.324_717_957_244_746_f64;
    let (a1, a2) = (1.0 / g, 1.0 / (g * g));

    let mut y = vec![0.0, 1.0, 0.0, 1.0];
    let mut z = vec![0.0, 0.0, 1.0, 1.0];
    for k in 1..=count {
        y.push((0.5 + a1 * k as f64).fract());
        z.push((0.5 + a2 * k as f64).fract());
    }
    (y, z)
}

/// Dataset sampling `field` at non-dimensional positions and dimensional times
///
/// The spatial field is stored as the negative collector potential.
pub fn planar_dataset(
    field: &PlanarField,
    (y, z): (Vec<f64>, Vec<f64>),
    times: Vec<f64>,
    timescale: f64,
) -> ScatteredDatasetBuilder {
    let samples = Array2::from_shape_fn((y.len(), times.len()), |(k, i)| {
        field.value(y[k], z[k], times[i] / timescale)
    });

    ScatteredDataset::builder(times, y, z).spatial(FieldName::NegativeCollectorPotential, samples)
}

/// Build a model on a 6 × 5 mesh of the unit square
pub fn build_model(
    dataset: &ScatteredDataset,
    config: &ReferenceConfiguration,
    length: f64,
    timescale: f64,
) -> fieldref::Result<ReferenceModel> {
    ReferenceModel::build(
        dataset,
        &EdgeMesh::uniform(DOMAIN, 1.0, 1.0, 6, 5),
        &ParameterValues::new(length, timescale),
        config,
    )
}

/// Assert two arrays agree elementwise, NaN matching NaN
pub fn assert_arrays_close(actual: ArrayView2<f64>, expected: ArrayView2<f64>, tolerance: f64, message: &str) {
    assert_eq!(actual.dim(), expected.dim(), "{}: Dimension mismatch", message);

    for ((index, &a), &b) in actual.indexed_iter().zip(expected.iter()) {
        if b.is_nan() {
            assert!(a.is_nan(), "{}: Element {:?} is {} but NaN was expected", message, index, a);
            continue;
        }
        let diff = (a - b).abs();
        assert!(
            diff < tolerance,
            "{}: Element {:?} differs by {} (tolerance {})",
            message, index, diff, tolerance
        );
    }
}
