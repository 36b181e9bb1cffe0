//! Clough–Tocher piecewise-cubic interpolation
//!
//! # Mathematical Background
//!
//! Each Delaunay triangle is split at its centroid into three sub-triangles,
//! and a cubic Bernstein–Bézier polynomial is built on each so that the
//! surface is C1-continuous across every edge. The patch is determined by:
//!
//! - the vertex values `f_i`,
//! - the vertex gradients `∇f_i` (estimated, see below),
//! - a cross-boundary derivative condition on each edge.
//!
//! In extended barycentric coordinates `(b1, b2, b3, b4)` with
//! `b4 = 3 · min(b)`, the value is
//!
//! ```text
//! w = Σ  (3! / (i! j! k! l!)) b1^i b2^j b3^k b4^l c_ijkl,   i + j + k + l = 3
//! ```
//!
//! # Gradient Estimation
//!
//! Vertex gradients minimise the integrated squared second derivative
//! along every edge. Each vertex solves a 2×2 normal system given its
//! neighbours' current gradients (Gauss–Seidel), sweeping until the largest
//! relative update drops below the configured tolerance.
//!
//! The fixed point of a linear field is its exact gradient, so linear data is
//! reproduced exactly (to rounding).
//!
//! # Cross-boundary Condition
//!
//! The derivative across an edge is taken along the direction from the
//! triangle's centroid to the neighbour's centroid, which keeps the scheme
//! affine invariant. Hull edges have no neighbour and use the direction
//! toward the opposite vertex.
//!
//! # Example
//!
//! ```rust
//! use fieldref::interpolation::{CloughTocher, ScatteredInterpolator, Triangulation};
//! use fieldref::grid::QueryGrid;
//! use nalgebra::Point2;
//!
//! let positions: Vec<_> = [0.0, 0.5, 1.0]
//!     .iter()
//!     .flat_map(|&z| [0.0, 0.5, 1.0].map(|y| Point2::new(y, z)))
//!     .collect();
//! let values: Vec<f64> = positions.iter().map(|p| 2.0 * p.x - p.y).collect();
//!
//! let triangulation = Triangulation::new(&positions).unwrap();
//! let grid = QueryGrid::new(vec![0.25, 0.75], vec![0.1]).unwrap();
//! let locations = triangulation.locate_grid(&grid);
//!
//! let field = CloughTocher::default()
//!     .interpolate(&triangulation, &locations, &values)
//!     .unwrap();
//! assert!((field[[0, 1]] - 1.4).abs() < 1e-6);
//! ```

use nalgebra::{Matrix2, Vector2};
use ndarray::Array2;

use crate::error::Result;
use crate::interpolation::traits::{GradientEstimation, ScatteredInterpolator};
use crate::interpolation::triangulation::{GridLocations, Location, Triangulation};

// =================================================================================================
// Clough-Tocher Interpolator
// =================================================================================================

/// Piecewise-cubic, C1-continuous scattered interpolator
#[derive(Debug, Clone, Copy, Default)]
pub struct CloughTocher {
    gradient: GradientEstimation,
}

impl CloughTocher {
    /// Create with explicit gradient-estimation parameters
    pub fn new(gradient: GradientEstimation) -> Self {
        Self { gradient }
    }

    /// Gradient-estimation parameters
    pub fn gradient(&self) -> GradientEstimation {
        self.gradient
    }

    /// Estimate per-vertex gradients (normalised coordinates)
    ///
    /// Not converging within the iteration budget is not an error: the last
    /// sweep is used and a `warn` is logged.
    pub fn estimate_gradients(&self, triangulation: &Triangulation, values: &[f64]) -> Vec<Vector2<f64>> {
        let mut gradients = vec![Vector2::zeros(); triangulation.vertex_count()];

        for iteration in 0..self.gradient.max_iterations {
            let mut error = 0.0_f64;

            for vertex in 0..triangulation.vertex_count() {
                let origin = triangulation.scaled_vertex(vertex);
                let f1 = values[vertex];

                let mut q = Matrix2::zeros();
                let mut s = Vector2::zeros();

                for &neighbor in triangulation.adjacent(vertex) {
                    let e = triangulation.scaled_vertex(neighbor) - origin;
                    let l3 = e.norm().powi(3);
                    let f2 = values[neighbor];
                    let df2 = -e.dot(&gradients[neighbor]);

                    q += (4.0 / l3) * e * e.transpose();
                    s += ((6.0 * (f1 - f2) - 2.0 * df2) / l3) * e;
                }

                let Some(inverse) = q.try_inverse() else {
                    continue;
                };
                let r = inverse * s;

                let change = (gradients[vertex] + r).amax() / r.amax().max(1.0);
                gradients[vertex] = -r;
                error = error.max(change);
            }

            if error < self.gradient.tolerance {
                log::debug!("Gradient estimation converged after {} sweep(s)", iteration + 1);
                return gradients;
            }
        }

        log::warn!(
            "Gradient estimation did not converge within {} sweeps",
            self.gradient.max_iterations
        );
        gradients
    }

    /// Evaluate the patch of `location.triangle` at `location.barycentric`
    fn evaluate(
        &self,
        triangulation: &Triangulation,
        values: &[f64],
        gradients: &[Vector2<f64>],
        location: &Location,
    ) -> f64 {
        let triangle = triangulation.triangles()[location.triangle];
        let [x1, x2, x3] = triangle.map(|v| triangulation.scaled_vertex(v));
        let [f1, f2, f3] = triangle.map(|v| values[v]);
        let [g1, g2, g3] = triangle.map(|v| gradients[v]);

        // ====== Edge derivatives ======

        let e12 = x2 - x1;
        let e23 = x3 - x2;
        let e31 = x1 - x3;

        let df12 = g1.dot(&e12);
        let df21 = -g2.dot(&e12);
        let df23 = g2.dot(&e23);
        let df32 = -g3.dot(&e23);
        let df31 = g3.dot(&e31);
        let df13 = -g1.dot(&e31);

        // ====== Boundary control points ======

        let c3000 = f1;
        let c2100 = (df12 + 3.0 * c3000) / 3.0;
        let c2010 = (df13 + 3.0 * c3000) / 3.0;
        let c0300 = f2;
        let c1200 = (df21 + 3.0 * c0300) / 3.0;
        let c0210 = (df23 + 3.0 * c0300) / 3.0;
        let c0030 = f3;
        let c1020 = (df31 + 3.0 * c0030) / 3.0;
        let c0120 = (df32 + 3.0 * c0030) / 3.0;

        let c2001 = (c2100 + c2010 + c3000) / 3.0;
        let c0201 = (c1200 + c0300 + c0210) / 3.0;
        let c0021 = (c1020 + c0120 + c0030) / 3.0;

        // ====== Cross-boundary directions ======

        let neighbors = triangulation.neighbors(location.triangle);
        let mut g = [-0.5; 3];
        for (k, neighbor) in neighbors.iter().enumerate() {
            let Some(neighbor) = neighbor else { continue };
            let c = triangulation.barycentric(location.triangle, triangulation.scaled_centroid(*neighbor));
            g[k] = match k {
                0 => (2.0 * c[2] + c[1] - 1.0) / (2.0 - 3.0 * c[2] - 3.0 * c[1]),
                1 => (2.0 * c[0] + c[2] - 1.0) / (2.0 - 3.0 * c[0] - 3.0 * c[2]),
                _ => (2.0 * c[1] + c[0] - 1.0) / (2.0 - 3.0 * c[1] - 3.0 * c[0]),
            };
        }

        // ====== Interior control points ======

        let c0111 = (g[0] * (-c0300 + 3.0 * c0210 - 3.0 * c0120 + c0030)
            + (-c0300 + 2.0 * c0210 - c0120 + c0021 + c0201))
            / 2.0;
        let c1011 = (g[1] * (-c0030 + 3.0 * c1020 - 3.0 * c2010 + c3000)
            + (-c0030 + 2.0 * c1020 - c2010 + c2001 + c0021))
            / 2.0;
        let c1101 = (g[2] * (-c3000 + 3.0 * c2100 - 3.0 * c1200 + c0300)
            + (-c3000 + 2.0 * c2100 - c1200 + c2001 + c0201))
            / 2.0;

        let c1002 = (c1101 + c1011 + c2001) / 3.0;
        let c0102 = (c1101 + c0111 + c0201) / 3.0;
        let c0012 = (c1011 + c0111 + c0021) / 3.0;
        let c0003 = (c1002 + c0102 + c0012) / 3.0;

        // ====== Bernstein evaluation ======

        let b = location.barycentric;
        let minval = b[0].min(b[1]).min(b[2]);
        let b1 = b[0] - minval;
        let b2 = b[1] - minval;
        let b3 = b[2] - minval;
        let b4 = 3.0 * minval;

        b1.powi(3) * c3000
            + 3.0 * b1 * b1 * b2 * c2100
            + 3.0 * b1 * b1 * b3 * c2010
            + 3.0 * b1 * b1 * b4 * c2001
            + 3.0 * b1 * b2 * b2 * c1200
            + 6.0 * b1 * b2 * b4 * c1101
            + 3.0 * b1 * b3 * b3 * c1020
            + 6.0 * b1 * b3 * b4 * c1011
            + 3.0 * b1 * b4 * b4 * c1002
            + b2.powi(3) * c0300
            + 3.0 * b2 * b2 * b3 * c0210
            + 3.0 * b2 * b2 * b4 * c0201
            + 3.0 * b2 * b3 * b3 * c0120
            + 6.0 * b2 * b3 * b4 * c0111
            + 3.0 * b2 * b4 * b4 * c0102
            + b3.powi(3) * c0030
            + 3.0 * b3 * b3 * b4 * c0021
            + 3.0 * b3 * b4 * b4 * c0012
            + b4.powi(3) * c0003
    }
}

impl ScatteredInterpolator for CloughTocher {
    fn name(&self) -> &str {
        "Clough-Tocher"
    }

    fn interpolate(
        &self,
        triangulation: &Triangulation,
        locations: &GridLocations,
        values: &[f64],
    ) -> Result<Array2<f64>> {
        let values = triangulation.vertex_values(values)?;
        let gradients = self.estimate_gradients(triangulation, &values);

        Ok(locations.map(|location| self.evaluate(triangulation, &values, &gradients, location)))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
