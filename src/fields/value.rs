//! Evaluated field values
//!
//! A reference field evaluated at one instant is either a single number
//! (series fields) or a 2D array over the query grid (spatial fields).

use ndarray::Array2;
use std::fmt;

/// Result of evaluating a field at one time
///
/// # Orientation
///
/// `Grid` arrays are indexed `[z-tick, y-tick]`: z varies along the first
/// axis (rows), y along the second (columns). Every producer and consumer in
/// this crate keeps that orientation; swapping it silently transposes
/// comparisons.
///
/// # Examples
///
/// ```rust
/// use fieldref::fields::FieldValue;
/// use ndarray::Array2;
///
/// let voltage = FieldValue::Scalar(3.7);
/// assert_eq!(voltage.try_as_scalar(), Some(3.7));
///
/// let temperature = FieldValue::Grid(Array2::from_elem((4, 3), 298.15));
/// assert_eq!(temperature.shape(), vec![4, 3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Single value of a series field
    Scalar(f64),

    /// Spatial field over the query grid, `[z, y]`
    Grid(Array2<f64>),
}

impl FieldValue {
    /// Check value is scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Check value is a grid
    pub fn is_grid(&self) -> bool {
        matches!(self, Self::Grid(_))
    }

    /// Get shape as a vector (`[]` for scalars)
    pub fn shape(&self) -> Vec<usize> {
        match self {
            FieldValue::Scalar(_) => vec![],
            FieldValue::Grid(grid) => grid.shape().to_vec(),
        }
    }

    /// Try to extract as a scalar
    pub fn try_as_scalar(&self) -> Option<f64> {
        match self {
            FieldValue::Scalar(value) => Some(*value),
            FieldValue::Grid(_) => None,
        }
    }

    /// Try to extract as a grid
    pub fn try_as_grid(&self) -> Option<&Array2<f64>> {
        match self {
            FieldValue::Grid(grid) => Some(grid),
            FieldValue::Scalar(_) => None,
        }
    }

    /// Consume into a grid
    pub fn into_grid(self) -> Option<Array2<f64>> {
        match self {
            FieldValue::Grid(grid) => Some(grid),
            FieldValue::Scalar(_) => None,
        }
    }

    /// Number of entries that are NaN or infinite
    ///
    /// Grid nodes outside the convex hull of the scatter positions are NaN.
    pub fn non_finite_count(&self) -> usize {
        match self {
            FieldValue::Scalar(value) => usize::from(!value.is_finite()),
            FieldValue::Grid(grid) => grid.iter().filter(|v| !v.is_finite()).count(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(value) => write!(f, "Scalar ({})", value),
            FieldValue::Grid(grid) => write!(f, "Grid [{} z * {} y]", grid.nrows(), grid.ncols()),
        }
    }
}

// ==================== Tests ====================
