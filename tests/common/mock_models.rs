//! Mock candidate solutions and services for testing
//!
//! These candidates have closed-form values, so the reference built from
//! their samples is known exactly (linear interpolation) or to solver
//! tolerance (Clough-Tocher).

use fieldref::external::{CandidateField, CandidateSeries, ParameterSource};
use fieldref::scaling::ScaleParameter;
use ndarray::Array2;

// =================================================================================================
// Planar field: u(y, z, t) = a + b*y + c*z + d*t
// =================================================================================================

/// Field linear in every non-dimensional coordinate
///
/// Returns `[y, z]` arrays, the default candidate orientation.
#[derive(Debug, Clone, Copy)]
pub struct PlanarField {
    pub offset: f64,
    pub y_slope: f64,
    pub z_slope: f64,
    pub time_slope: f64,
}

impl PlanarField {
    pub fn new(offset: f64, y_slope: f64, z_slope: f64, time_slope: f64) -> Self {
        Self { offset, y_slope, z_slope, time_slope }
    }

    /// Exact value at non-dimensional coordinates
    pub fn value(&self, y: f64, z: f64, t: f64) -> f64 {
        self.offset + self.y_slope * y + self.z_slope * z + self.time_slope * t
    }
}

impl CandidateField for PlanarField {
    fn evaluate(&self, y: &[f64], z: &[f64], t: f64) -> Array2<f64> {
        Array2::from_shape_fn((y.len(), z.len()), |(i, j)| self.value(y[i], z[j], t))
    }
}

// =================================================================================================
// Linear series: v(t) = start + slope*t
// =================================================================================================

/// Series linear in non-dimensional time
#[derive(Debug, Clone, Copy)]
pub struct LinearSeries {
    pub start: f64,
    pub slope: f64,
}

impl LinearSeries {
    pub fn new(start: f64, slope: f64) -> Self {
        Self { start, slope }
    }

    /// Exact value at non-dimensional time
    pub fn value(&self, t: f64) -> f64 {
        self.start + self.slope * t
    }
}

impl CandidateSeries for LinearSeries {
    fn evaluate(&self, t: &[f64]) -> Vec<f64> {
        t.iter().map(|&t| self.value(t)).collect()
    }
}

// =================================================================================================
// Parameter source without a timescale
// =================================================================================================

/// Resolves the characteristic length only
pub struct MissingScales {
    pub length: f64,
}

impl ParameterSource for MissingScales {
    fn evaluate(&self, parameter: ScaleParameter) -> Option<f64> {
        match parameter {
            ScaleParameter::CharacteristicLength => Some(self.length),
            ScaleParameter::DischargeTimescale => None,
        }
    }
}
