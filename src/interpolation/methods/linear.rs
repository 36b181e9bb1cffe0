//! Piecewise-linear interpolation along time
//!
//! Between two sampled instants `t_i < t < t_{i+1}`:
//!
//! ```text
//! u(t) = (1 - w) u_i + w u_{i+1},    w = (t - t_i) / (t_{i+1} - t_i)
//! ```
//!
//! Monotone-preserving: the result always lies between the two bracketing
//! samples. Sampled instants return the stored slice unchanged.

use ndarray::{ArrayD, ArrayViewD, Axis};

use crate::error::Result;
use crate::interpolation::temporal::{Bracket, TimeAxis};
use crate::interpolation::traits::TimeInterpolator;

/// Linear interpolation between bracketing time samples
#[derive(Debug, Clone, Copy, Default)]
pub struct PiecewiseLinear;

impl PiecewiseLinear {
    /// Create a new piecewise-linear time interpolator
    pub fn new() -> Self {
        Self
    }
}

impl TimeInterpolator for PiecewiseLinear {
    fn name(&self) -> &str {
        "Piecewise-linear"
    }

    fn interpolate(&self, axis: &TimeAxis, samples: ArrayViewD<'_, f64>, t: f64) -> Result<ArrayD<f64>> {
        let time = Axis(samples.ndim() - 1);

        match axis.bracket(t)? {
            Bracket::Exact(index) => Ok(samples.index_axis(time, index).to_owned()),
            Bracket::Between { lower, weight } => {
                let before = samples.index_axis(time, lower);
                let after = samples.index_axis(time, lower + 1);
                Ok(&before * (1.0 - weight) + &after * weight)
            }
        }
    }
}
