//! Scattered-to-grid resampling
//!
//! [`ScatteredGridder`] binds one scatter cloud to one query grid: the
//! triangulation and the location of every grid node are computed once, then
//! any number of value slices (fields × time samples) are resolved against
//! them.
//!
//! [`griddata`] is the one-shot form for a single slice.

use nalgebra::Point2;
use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::error::{FieldError, Result};
use crate::grid::QueryGrid;
use crate::interpolation::traits::{ScatteredInterpolator, ScatteredMethod};
use crate::interpolation::triangulation::{GridLocations, Triangulation};

/// Triangulated scatter cloud bound to a query grid
#[derive(Debug)]
pub struct ScatteredGridder {
    triangulation: Triangulation,
    locations: GridLocations,
    interpolator: Box<dyn ScatteredInterpolator>,
}

impl ScatteredGridder {
    /// Triangulate `positions` and locate every node of `grid`
    ///
    /// `positions` and `grid` must share units.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if the positions cannot be triangulated.
    pub fn new(positions: &[Point2<f64>], grid: &QueryGrid, method: &ScatteredMethod) -> Result<Self> {
        let triangulation = Triangulation::new(positions)?;
        let locations = triangulation.locate_grid(grid);

        Ok(Self {
            triangulation,
            locations,
            interpolator: method.build(),
        })
    }

    /// Underlying triangulation
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    /// Grid node locations
    pub fn locations(&self) -> &GridLocations {
        &self.locations
    }

    /// Interpolator name
    pub fn method_name(&self) -> &str {
        self.interpolator.name()
    }

    /// Resolve one slice of scattered values, `[z, y]`
    pub fn interpolate(&self, values: &[f64]) -> Result<Array2<f64>> {
        self.interpolator
            .interpolate(&self.triangulation, &self.locations, values)
    }

    /// Resolve every time sample of a `[points, times]` block into a
    /// `[z, y, times]` stack
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the block does not hold one row per sample.
    pub fn interpolate_series(&self, samples: ArrayView2<'_, f64>) -> Result<Array3<f64>> {
        let (points, times) = samples.dim();
        if points != self.triangulation.sample_count() {
            return Err(FieldError::shape_mismatch(
                "scatter samples",
                &[self.triangulation.sample_count(), times],
                &[points, times],
            ));
        }

        let (nz, ny) = self.locations.shape();
        let mut stack = Array3::from_elem((nz, ny, times), f64::NAN);

        for (index, column) in samples.axis_iter(Axis(1)).enumerate() {
            let values = column.to_vec();
            let slice = self.interpolate(&values)?;
            stack.index_axis_mut(Axis(2), index).assign(&slice);
        }

        Ok(stack)
    }
}

/// Interpolate one slice of scattered values onto `grid`
///
/// # Example
///
/// ```rust
/// use fieldref::grid::QueryGrid;
/// use fieldref::interpolation::{griddata, ScatteredMethod};
/// use nalgebra::Point2;
///
/// let positions = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(1.0, 1.0),
/// ];
/// let values = [0.0, 1.0, 1.0, 2.0];
/// let grid = QueryGrid::new(vec![0.5, 2.0], vec![0.5]).unwrap();
///
/// let field = griddata(&positions, &values, &grid, &ScatteredMethod::Linear).unwrap();
/// assert!((field[[0, 0]] - 1.0).abs() < 1e-12);
/// assert!(field[[0, 1]].is_nan());
/// ```
pub fn griddata(
    positions: &[Point2<f64>],
    values: &[f64],
    grid: &QueryGrid,
    method: &ScatteredMethod,
) -> Result<Array2<f64>> {
    ScatteredGridder::new(positions, grid, method)?.interpolate(values)
}
