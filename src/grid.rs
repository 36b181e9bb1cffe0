//! Rectangular query grid
//!
//! The grid on which every spatial reference field is resolved and every
//! comparison is evaluated. Coordinates are stored in dimensional units.

use nalgebra::Point2;

use crate::error::{ensure_increasing, Result};
use crate::scaling::CharacteristicScales;

/// Rectangular (not necessarily uniform) grid of `(y, z)` nodes
///
/// Arrays over the grid are indexed `[z-tick, y-tick]`, hence
/// [`shape`](QueryGrid::shape) returns `(nz, ny)`.
///
/// # Example
///
/// ```rust
/// use fieldref::grid::QueryGrid;
///
/// let grid = QueryGrid::new(vec![0.0, 0.1, 0.2], vec![0.0, 0.5]).unwrap();
/// assert_eq!(grid.shape(), (2, 3));
/// assert!(QueryGrid::new(vec![0.0, 0.0], vec![1.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryGrid {
    y: Vec<f64>,
    z: Vec<f64>,
}

impl QueryGrid {
    /// Create from dimensional tick sequences
    ///
    /// # Errors
    ///
    /// `NonIncreasingAxis` if either sequence is empty, non-finite or not
    /// strictly increasing.
    pub fn new(y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        ensure_increasing("y", &y)?;
        ensure_increasing("z", &z)?;
        Ok(Self { y, z })
    }

    /// Create from non-dimensional ticks, scaling both axes by `L`
    pub fn from_dimensionless(y: &[f64], z: &[f64], scales: &CharacteristicScales) -> Result<Self> {
        Self::new(scales.to_dimensional_lengths(y), scales.to_dimensional_lengths(z))
    }

    /// Dimensional y ticks
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Dimensional z ticks
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Non-dimensional y ticks
    pub fn dimensionless_y(&self, scales: &CharacteristicScales) -> Vec<f64> {
        scales.to_dimensionless_lengths(&self.y)
    }

    /// Non-dimensional z ticks
    pub fn dimensionless_z(&self, scales: &CharacteristicScales) -> Vec<f64> {
        scales.to_dimensionless_lengths(&self.z)
    }

    /// Array shape over this grid, `(nz, ny)`
    pub fn shape(&self) -> (usize, usize) {
        (self.z.len(), self.y.len())
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.y.len() * self.z.len()
    }

    /// Never true for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Node at `[iz, iy]`
    pub fn node(&self, iz: usize, iy: usize) -> Point2<f64> {
        Point2::new(self.y[iy], self.z[iz])
    }

    /// Nodes in `[z, y]` row-major order
    pub fn nodes(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.z
            .iter()
            .flat_map(move |&z| self.y.iter().map(move |&y| Point2::new(y, z)))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
