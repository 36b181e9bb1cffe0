//! Interpolation traits and method selection
//!
//! # Design
//!
//! Two independent seams:
//!
//! - [`ScatteredInterpolator`]: one time slice of scattered values → values on
//!   the query grid, given a shared [`Triangulation`] and pre-computed
//!   [`GridLocations`].
//! - [`TimeInterpolator`]: samples along a [`TimeAxis`] → value at one time.
//!
//! The central enum [`ScatteredMethod`] selects the spatial scheme from a
//! configuration.

use ndarray::{Array2, ArrayD, ArrayViewD};
use std::fmt::Debug;

use crate::error::{FieldError, Result};
use crate::interpolation::methods::{CloughTocher, LinearBarycentric};
use crate::interpolation::temporal::TimeAxis;
use crate::interpolation::triangulation::{GridLocations, Triangulation};

// =================================================================================================
// Scattered interpolation
// =================================================================================================

/// Interpolates one slice of scattered values onto a grid
///
/// Implementations are stateless with respect to the data: the triangulation
/// and grid locations are built once by the caller and shared by every field
/// and time sample.
pub trait ScatteredInterpolator: Send + Sync + Debug {
    /// Method name for logs and exports
    fn name(&self) -> &str;

    /// Interpolate `values` (one per scatter sample, duplicates included)
    ///
    /// Returns an array shaped `locations.shape()`, `[z, y]`, with NaN at
    /// nodes outside the convex hull.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `values` does not hold one value per sample.
    fn interpolate(
        &self,
        triangulation: &Triangulation,
        locations: &GridLocations,
        values: &[f64],
    ) -> Result<Array2<f64>>;
}

/// Parameters of the global vertex-gradient estimation
///
/// The iteration minimises the curvature of the piecewise-cubic surface
/// across edges. It stops once the largest relative gradient update of a
/// sweep falls below `tolerance`, or after `max_iterations` sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientEstimation {
    /// Convergence threshold on the relative gradient update
    pub tolerance: f64,

    /// Maximum number of Gauss-Seidel sweeps
    pub max_iterations: usize,
}

impl Default for GradientEstimation {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 400,
        }
    }
}

impl GradientEstimation {
    /// Check that the parameters are usable
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(FieldError::invalid_configuration(format!(
                "gradient tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(FieldError::invalid_configuration(
                "gradient estimation needs at least one iteration",
            ));
        }
        Ok(())
    }
}

/// Spatial interpolation scheme
///
/// # Example
///
/// ```rust
/// use fieldref::interpolation::{GradientEstimation, ScatteredMethod};
///
/// let method = ScatteredMethod::default();
/// assert_eq!(method.name(), "Clough-Tocher");
///
/// let linear = ScatteredMethod::Linear;
/// assert_eq!(linear.build().name(), "Linear");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScatteredMethod {
    /// Piecewise-cubic, C1-continuous (default)
    CloughTocher(GradientEstimation),

    /// Piecewise-linear on the same triangulation
    Linear,
}

impl Default for ScatteredMethod {
    fn default() -> Self {
        ScatteredMethod::CloughTocher(GradientEstimation::default())
    }
}

impl ScatteredMethod {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            ScatteredMethod::CloughTocher(_) => "Clough-Tocher",
            ScatteredMethod::Linear => "Linear",
        }
    }

    /// Validate method parameters
    pub fn validate(&self) -> Result<()> {
        match self {
            ScatteredMethod::CloughTocher(gradient) => gradient.validate(),
            ScatteredMethod::Linear => Ok(()),
        }
    }

    /// Instantiate the interpolator
    pub fn build(&self) -> Box<dyn ScatteredInterpolator> {
        match self {
            ScatteredMethod::CloughTocher(gradient) => Box::new(CloughTocher::new(*gradient)),
            ScatteredMethod::Linear => Box::new(LinearBarycentric::new()),
        }
    }
}

// =================================================================================================
// Time interpolation
// =================================================================================================

/// Interpolates samples along a time axis
pub trait TimeInterpolator: Send + Sync + Debug {
    /// Method name for logs
    fn name(&self) -> &str;

    /// Value at time `t`
    ///
    /// `samples` carries time along its **last** axis, whose length equals
    /// `axis.len()`. The result drops that axis (a 0-dimensional array for
    /// scalar series).
    ///
    /// # Errors
    ///
    /// `TimeOutOfRange` if `t` is not finite or outside the axis.
    fn interpolate(&self, axis: &TimeAxis, samples: ArrayViewD<'_, f64>, t: f64) -> Result<ArrayD<f64>>;
}

// =================================================================================================
// Tests
// =================================================================================================
