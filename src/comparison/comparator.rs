//! Candidate vs reference comparison
//!
//! # Procedure
//!
//! For a spatial field at dimensional time `t`:
//!
//! 1. Project the query grid and `t` to non-dimensional units (÷L, ÷τ).
//! 2. Evaluate the candidate there; transpose its output to `[z, y]` when it
//!    is oriented `[y, z]`.
//! 3. Evaluate the reference at dimensional `t`.
//! 4. Compute the pointwise error:
//!
//! ```text
//! absolute:  e = |A - B|
//! relative:  e = |A - B| / |B|
//! ```
//!
//! Relative mode does not guard `B = 0`: the error there is Inf (or NaN
//! when `A = B = 0`). [`ErrorSummary`] counts such entries separately.

use ndarray::{Array2, Zip};
use std::fmt;
use std::str::FromStr;

use crate::comparison::summary::ErrorSummary;
use crate::error::{FieldError, Result};
use crate::external::{CandidateField, CandidateSeries, GridOrientation};
use crate::fields::FieldName;
use crate::reference::ReferenceModel;

// =================================================================================================
// Error mode
// =================================================================================================

/// Pointwise error measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// `|A - B|`
    #[default]
    Absolute,

    /// `|A - B| / |B|`
    Relative,
}

impl ErrorMode {
    /// Short label (`"abs"` / `"rel"`)
    pub fn label(&self) -> &'static str {
        match self {
            ErrorMode::Absolute => "abs",
            ErrorMode::Relative => "rel",
        }
    }

    /// Error between a candidate value and a reference value
    pub fn apply(&self, candidate: f64, reference: f64) -> f64 {
        match self {
            ErrorMode::Absolute => (candidate - reference).abs(),
            ErrorMode::Relative => ((candidate - reference) / reference).abs(),
        }
    }
}

impl FromStr for ErrorMode {
    type Err = FieldError;

    fn from_str(flag: &str) -> Result<Self> {
        match flag.trim().to_ascii_lowercase().as_str() {
            "abs" | "absolute" => Ok(ErrorMode::Absolute),
            "rel" | "relative" => Ok(ErrorMode::Relative),
            other => Err(FieldError::invalid_configuration(format!(
                "unknown error mode `{other}`, expected `abs` or `rel`"
            ))),
        }
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =================================================================================================
// Results
// =================================================================================================

/// Comparison of one spatial field at one time
///
/// All arrays are `[z, y]` over the reference query grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldComparison {
    /// Compared field
    pub field: FieldName,

    /// Error measure
    pub mode: ErrorMode,

    /// Dimensional time
    pub time: f64,

    /// Dimensional y ticks
    pub y: Vec<f64>,

    /// Dimensional z ticks
    pub z: Vec<f64>,

    /// Candidate values
    pub candidate: Array2<f64>,

    /// Reference values
    pub reference: Array2<f64>,

    /// Pointwise error
    pub error: Array2<f64>,
}

impl FieldComparison {
    /// Statistics of the error array
    pub fn summary(&self) -> ErrorSummary {
        ErrorSummary::from_values(self.error.iter().copied())
    }
}

/// Comparison of one series field over several times
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesComparison {
    /// Compared field
    pub field: FieldName,

    /// Error measure
    pub mode: ErrorMode,

    /// Dimensional times
    pub times: Vec<f64>,

    /// Candidate values
    pub candidate: Vec<f64>,

    /// Reference values
    pub reference: Vec<f64>,

    /// Pointwise error
    pub error: Vec<f64>,
}

impl SeriesComparison {
    /// Statistics of the error vector
    pub fn summary(&self) -> ErrorSummary {
        ErrorSummary::from_values(self.error.iter().copied())
    }
}

// =================================================================================================
// Comparator
// =================================================================================================

/// Compares candidate solutions against a reference model
///
/// # Example
///
/// ```rust
/// use fieldref::comparison::{Comparator, ErrorMode};
/// use fieldref::external::{EdgeMesh, ParameterValues};
/// use fieldref::fields::FieldName;
/// use fieldref::reference::{ReferenceConfiguration, ReferenceModel, ScatteredDataset};
/// use ndarray::Array2;
///
/// let dataset = ScatteredDataset::builder(
///     vec![0.0, 1.0],
///     vec![0.0, 1.0, 0.0, 1.0],
///     vec![0.0, 0.0, 1.0, 1.0],
/// )
/// .spatial(FieldName::Temperature, Array2::from_elem((4, 2), 300.0))
/// .build()
/// .unwrap();
///
/// let model = ReferenceModel::build(
///     &dataset,
///     &EdgeMesh::uniform("current collector", 1.0, 1.0, 4, 3),
///     &ParameterValues::new(1.0, 1.0),
///     &ReferenceConfiguration::default(),
/// )
/// .unwrap();
///
/// // candidate returns [y, z] arrays, one kelvin too hot
/// let candidate = |y: &[f64], z: &[f64], _t: f64| Array2::from_elem((y.len(), z.len()), 301.0);
///
/// let comparison = Comparator::new(&model, ErrorMode::Absolute)
///     .compare_field(FieldName::Temperature, &candidate, 0.5)
///     .unwrap();
///
/// assert_eq!(comparison.error.dim(), (3, 4));
/// assert!(comparison.error.iter().all(|&e| (e - 1.0).abs() < 1e-9));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'a> {
    reference: &'a ReferenceModel,
    mode: ErrorMode,
}

impl<'a> Comparator<'a> {
    /// Create a comparator against `reference`
    pub fn new(reference: &'a ReferenceModel, mode: ErrorMode) -> Self {
        Self { reference, mode }
    }

    /// Error measure
    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// Reference model
    pub fn reference(&self) -> &'a ReferenceModel {
        self.reference
    }

    /// Compare a spatial field at dimensional time `t`
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if `field` is a series field
    /// - `MissingField` if the reference lacks `field`
    /// - `TimeOutOfRange` if `t` is outside the reference time axis
    /// - `ShapeMismatch` if the candidate output does not match the grid
    pub fn compare_field(
        &self,
        field: FieldName,
        candidate: &dyn CandidateField,
        t: f64,
    ) -> Result<FieldComparison> {
        if !field.is_spatial() {
            return Err(FieldError::invalid_configuration(format!(
                "`{}` is a series field, compare it with compare_series",
                field.dataset_key()
            )));
        }

        // ====== Step 1: Reference ======

        let reference = self
            .reference
            .evaluate(field, t)?
            .into_grid()
            .ok_or(FieldError::MissingField(field))?;

        // ====== Step 2: Candidate ======

        let grid = self.reference.grid();
        let scales = self.reference.scales();

        let y = grid.dimensionless_y(scales);
        let z = grid.dimensionless_z(scales);
        let raw = candidate.evaluate(&y, &z, scales.to_dimensionless_time(t));
        let candidate = orient(raw, candidate.orientation(), grid.shape())?;

        // ====== Step 3: Error ======

        let mode = self.mode;
        let error = Zip::from(&candidate)
            .and(&reference)
            .map_collect(|&a, &b| mode.apply(a, b));

        Ok(FieldComparison {
            field,
            mode,
            time: t,
            y: grid.y().to_vec(),
            z: grid.z().to_vec(),
            candidate,
            reference,
            error,
        })
    }

    /// Compare a series field at dimensional times `times`
    ///
    /// The candidate is evaluated at `times / τ`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if `field` is a spatial field
    /// - `MissingField` if the reference lacks `field`
    /// - `TimeOutOfRange` on the first time outside the reference time axis
    /// - `ShapeMismatch` if the candidate returns the wrong number of values
    pub fn compare_series(
        &self,
        field: FieldName,
        candidate: &dyn CandidateSeries,
        times: &[f64],
    ) -> Result<SeriesComparison> {
        if field.is_spatial() {
            return Err(FieldError::invalid_configuration(format!(
                "`{}` is a spatial field, compare it with compare_field",
                field.dataset_key()
            )));
        }

        let reference = self
            .reference
            .field(field)?
            .evaluate_many(times)?
            .into_iter()
            .map(|value| value.try_as_scalar().ok_or(FieldError::MissingField(field)))
            .collect::<Result<Vec<f64>>>()?;

        let scaled = self.reference.scales().to_dimensionless_times(times);
        let values = candidate.evaluate(&scaled);
        if values.len() != times.len() {
            return Err(FieldError::shape_mismatch(
                format!("candidate {}", field.dataset_key()),
                &[times.len()],
                &[values.len()],
            ));
        }

        let mode = self.mode;
        let error = values
            .iter()
            .zip(&reference)
            .map(|(&a, &b)| mode.apply(a, b))
            .collect();

        Ok(SeriesComparison {
            field,
            mode,
            times: times.to_vec(),
            candidate: values,
            reference,
            error,
        })
    }
}

/// Bring a candidate array into `[z, y]` order, checking its shape
fn orient(raw: Array2<f64>, orientation: GridOrientation, (nz, ny): (usize, usize)) -> Result<Array2<f64>> {
    let expected = match orientation {
        GridOrientation::YZ => [ny, nz],
        GridOrientation::ZY => [nz, ny],
    };
    if raw.shape() != expected {
        return Err(FieldError::shape_mismatch("candidate field", &expected, raw.shape()));
    }

    Ok(match orientation {
        GridOrientation::YZ => raw.reversed_axes().as_standard_layout().into_owned(),
        GridOrientation::ZY => raw,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
