//! Piecewise-linear scattered interpolation
//!
//! Within each Delaunay triangle the value is the barycentric blend of the
//! three vertex values:
//!
//! ```text
//! w = b1 f1 + b2 f2 + b3 f3
//! ```
//!
//! Continuous (C0) but not smooth across edges. Cheaper than Clough–Tocher
//! and never overshoots the vertex values.

use ndarray::Array2;

use crate::error::Result;
use crate::interpolation::traits::ScatteredInterpolator;
use crate::interpolation::triangulation::{GridLocations, Triangulation};

/// Barycentric piecewise-linear interpolator
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearBarycentric;

impl LinearBarycentric {
    /// Create a new linear interpolator
    pub fn new() -> Self {
        Self
    }
}

impl ScatteredInterpolator for LinearBarycentric {
    fn name(&self) -> &str {
        "Linear"
    }

    fn interpolate(
        &self,
        triangulation: &Triangulation,
        locations: &GridLocations,
        values: &[f64],
    ) -> Result<Array2<f64>> {
        let values = triangulation.vertex_values(values)?;
        let triangles = triangulation.triangles();

        Ok(locations.map(|location| {
            triangles[location.triangle]
                .iter()
                .zip(location.barycentric)
                .map(|(&vertex, weight)| weight * values[vertex])
                .sum()
        }))
    }
}
