//! Error types for reference model construction, evaluation and comparison
//!
//! Every failure of the crate is reported through [`FieldError`]. Variants are
//! grouped into a small taxonomy ([`ErrorKind`]) so callers can react to the
//! category without matching on every variant:
//!
//! | Kind              | When                                                     |
//! |-------------------|----------------------------------------------------------|
//! | `Configuration`   | bad scales, bad grids, insufficient scatter data         |
//! | `DataRange`       | query time outside the sampled time axis                 |
//! | `ShapeMismatch`   | array shapes disagree with the grid or the time axis     |
//! | `Io`              | export failures                                          |
//!
//! Querying outside the convex hull of the scatter positions is NOT an error:
//! the affected grid nodes are NaN.

use thiserror::Error;

use crate::fields::FieldName;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, FieldError>;

/// Category of a [`FieldError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Construction inputs are unusable (fatal at build time)
    Configuration,

    /// A query fell outside the data the model was built from
    DataRange,

    /// Two arrays that must agree in shape do not
    ShapeMismatch,

    /// Writing results failed
    Io,
}

/// Errors raised while building, querying or comparing field models
#[derive(Debug, Error)]
pub enum FieldError {
    /// The parameter service could not resolve a characteristic scale.
    #[error("characteristic {parameter} is unavailable from the parameter source")]
    ScaleUnavailable {
        /// Symbolic name of the parameter
        parameter: &'static str,
    },

    /// A characteristic scale resolved to an unusable value (zero, non-finite,
    /// or a non-positive length).
    #[error("characteristic {parameter} is not a usable scale, got {value}")]
    InvalidScale {
        /// Symbolic name of the parameter
        parameter: &'static str,
        /// Value returned by the parameter source
        value: f64,
    },

    /// Not enough usable scatter points to build an interpolant.
    #[error("insufficient scatter data: {reason}")]
    InsufficientData {
        /// What exactly is missing
        reason: String,
    },

    /// Coordinates along an axis are not strictly increasing.
    #[error("{axis} coordinates must be non-empty and strictly increasing")]
    NonIncreasingAxis {
        /// Axis label (`"y"`, `"z"`, `"time"`)
        axis: &'static str,
    },

    /// The mesh service has no edges for the requested domain.
    #[error("mesh domain `{domain}` has no {axis} edges")]
    MeshUnavailable {
        /// Domain name requested from the mesh service
        domain: String,
        /// Axis that could not be resolved
        axis: &'static str,
    },

    /// A dataset key outside the known field vocabulary.
    #[error("unknown field key `{0}`")]
    UnknownField(String),

    /// The field is known but the dataset did not provide it.
    #[error("field `{0}` is not present in the reference dataset")]
    MissingField(FieldName),

    /// A configuration value is out of its admissible range.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the offending value
        message: String,
    },

    /// Query time outside the sampled time axis (or not a number).
    #[error("time {time} is outside the sampled range [{min}, {max}]")]
    TimeOutOfRange {
        /// Requested (dimensional) time
        time: f64,
        /// First sampled instant
        min: f64,
        /// Last sampled instant
        max: f64,
    },

    /// Two arrays that must agree in shape do not.
    #[error("shape mismatch for {context}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// What was being checked
        context: String,
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        actual: Vec<usize>,
    },

    /// Writing an export failed.
    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FieldError {
    /// Create an InsufficientData error.
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(context: impl Into<String>, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Taxonomy category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::ScaleUnavailable { .. }
            | FieldError::InvalidScale { .. }
            | FieldError::InsufficientData { .. }
            | FieldError::NonIncreasingAxis { .. }
            | FieldError::MeshUnavailable { .. }
            | FieldError::UnknownField(_)
            | FieldError::MissingField(_)
            | FieldError::InvalidConfiguration { .. } => ErrorKind::Configuration,
            FieldError::TimeOutOfRange { .. } => ErrorKind::DataRange,
            FieldError::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            FieldError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Check that `values` is non-empty, finite and strictly increasing
pub(crate) fn ensure_increasing(axis: &'static str, values: &[f64]) -> Result<()> {
    if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
        return Err(FieldError::NonIncreasingAxis { axis });
    }
    if values.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(FieldError::NonIncreasingAxis { axis });
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
