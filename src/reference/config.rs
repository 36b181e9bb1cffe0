//! Reference model configuration

use crate::error::{ensure_increasing, FieldError, Result};
use crate::interpolation::{GradientEstimation, ScatteredMethod};

/// Default mesh domain the query grid is taken from
pub const DEFAULT_MESH_DOMAIN: &str = "current collector";

/// Units of the scatter positions in a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateUnits {
    /// Scaled by the characteristic length (converted ×L on ingestion)
    #[default]
    Dimensionless,

    /// Already in physical units (used as-is)
    Dimensional,
}

/// Explicit dimensional grid ticks
#[derive(Debug, Clone, PartialEq)]
pub struct GridTicks {
    /// y ticks (dimensional)
    pub y: Vec<f64>,

    /// z ticks (dimensional)
    pub z: Vec<f64>,
}

/// Configuration of [`ReferenceModel::build`](crate::reference::ReferenceModel::build)
///
/// # Example
///
/// ```rust
/// use fieldref::interpolation::ScatteredMethod;
/// use fieldref::reference::{CoordinateUnits, ReferenceConfiguration};
///
/// let config = ReferenceConfiguration::default()
///     .with_method(ScatteredMethod::Linear)
///     .with_scatter_units(CoordinateUnits::Dimensional)
///     .with_grid(vec![0.0, 0.05, 0.1], vec![0.0, 0.1]);
///
/// assert!(config.validate().is_ok());
/// assert!(ReferenceConfiguration::default().with_mesh_domain("").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceConfiguration {
    /// Spatial interpolation scheme
    pub method: ScatteredMethod,

    /// Units of the dataset positions
    pub scatter_units: CoordinateUnits,

    /// Explicit query grid; the mesh edges are used when `None`
    pub grid: Option<GridTicks>,

    /// Mesh domain providing the query grid edges
    pub mesh_domain: String,
}

impl Default for ReferenceConfiguration {
    fn default() -> Self {
        Self {
            method: ScatteredMethod::default(),
            scatter_units: CoordinateUnits::default(),
            grid: None,
            mesh_domain: DEFAULT_MESH_DOMAIN.to_string(),
        }
    }
}

impl ReferenceConfiguration {
    /// Clough–Tocher with explicit gradient-estimation parameters
    pub fn clough_tocher(tolerance: f64, max_iterations: usize) -> Self {
        Self::default().with_method(ScatteredMethod::CloughTocher(GradientEstimation {
            tolerance,
            max_iterations,
        }))
    }

    /// Set the spatial interpolation scheme
    pub fn with_method(mut self, method: ScatteredMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the units of the dataset positions
    pub fn with_scatter_units(mut self, units: CoordinateUnits) -> Self {
        self.scatter_units = units;
        self
    }

    /// Use explicit dimensional grid ticks instead of the mesh edges
    pub fn with_grid(mut self, y: Vec<f64>, z: Vec<f64>) -> Self {
        self.grid = Some(GridTicks { y, z });
        self
    }

    /// Take the grid edges from another mesh domain
    pub fn with_mesh_domain(mut self, domain: impl Into<String>) -> Self {
        self.mesh_domain = domain.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.method.validate()?;

        if let Some(grid) = &self.grid {
            ensure_increasing("y", &grid.y)?;
            ensure_increasing("z", &grid.z)?;
        } else if self.mesh_domain.trim().is_empty() {
            return Err(FieldError::invalid_configuration("mesh domain must not be empty"));
        }

        Ok(())
    }
}
