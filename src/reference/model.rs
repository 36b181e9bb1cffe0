//! Reference model construction and queries
//!
//! # Construction
//!
//! [`ReferenceModel::build`] turns a scattered dataset into a set of
//! time-continuous fields on a rectangular query grid:
//!
//! 1. Resolve the characteristic scales from the parameter service.
//! 2. Resolve the query grid: explicit ticks from the configuration, or the
//!    mesh edges of the configured domain scaled by `L`.
//! 3. Triangulate the scatter positions once and locate every grid node.
//!    Skipped when the dataset carries no spatial field.
//! 4. Resolve every spatial field, one time sample at a time, into a
//!    gridded time series.
//! 5. Wrap the scalar series directly.
//!
//! Any failure aborts the build; a partially built model is never returned.
//! Once built, the model is immutable and only answers queries.

use std::collections::BTreeMap;

use crate::error::{FieldError, Result};
use crate::external::{MeshGeometry, ParameterSource, SpatialAxis};
use crate::fields::{FieldName, FieldValue};
use crate::grid::QueryGrid;
use crate::interpolation::{ScatteredGridder, TimeAxis};
use crate::reference::config::{CoordinateUnits, ReferenceConfiguration};
use crate::reference::dataset::ScatteredDataset;
use crate::reference::interpolant::FieldInterpolant;
use crate::scaling::CharacteristicScales;

/// Interpolated reference solution
///
/// # Example
///
/// ```rust
/// use fieldref::external::{EdgeMesh, ParameterValues};
/// use fieldref::fields::FieldName;
/// use fieldref::reference::{ReferenceConfiguration, ReferenceModel, ScatteredDataset};
/// use ndarray::Array2;
///
/// // 3 × 3 non-dimensional positions, 3 time samples
/// let ticks = [0.0, 0.5, 1.0];
/// let y: Vec<f64> = ticks.iter().flat_map(|_| ticks).collect();
/// let z: Vec<f64> = ticks.iter().flat_map(|&z| [z; 3]).collect();
/// let temperature = Array2::from_shape_fn((9, 3), |(k, t)| 298.0 + k as f64 + t as f64);
///
/// let dataset = ScatteredDataset::builder(vec![0.0, 60.0, 120.0], y, z)
///     .spatial(FieldName::Temperature, temperature)
///     .build()
///     .unwrap();
///
/// let model = ReferenceModel::build(
///     &dataset,
///     &EdgeMesh::uniform("current collector", 1.0, 1.0, 3, 3),
///     &ParameterValues::new(0.2, 3600.0),
///     &ReferenceConfiguration::default(),
/// )
/// .unwrap();
///
/// let value = model.evaluate(FieldName::Temperature, 30.0).unwrap();
/// assert_eq!(value.shape(), vec![3, 3]);
/// assert!(model.evaluate(FieldName::TerminalVoltage, 30.0).is_err());
/// ```
#[derive(Debug)]
pub struct ReferenceModel {
    grid: QueryGrid,
    scales: CharacteristicScales,
    time: TimeAxis,
    fields: BTreeMap<FieldName, FieldInterpolant>,
    method: String,
    outside_nodes: usize,
}

impl ReferenceModel {
    /// Build the reference model
    ///
    /// # Errors
    ///
    /// Every construction failure is fatal:
    /// - invalid configuration, unavailable or invalid scales,
    /// - unknown mesh domain, non-increasing grid ticks,
    /// - fewer than three distinct or only collinear scatter positions
    ///   (only checked when a spatial field is present),
    /// - field arrays inconsistent with the dataset.
    pub fn build(
        dataset: &ScatteredDataset,
        mesh: &dyn MeshGeometry,
        parameters: &dyn ParameterSource,
        config: &ReferenceConfiguration,
    ) -> Result<Self> {
        config.validate()?;

        // ====== Step 1: Characteristic scales ======

        let scales = CharacteristicScales::from_parameters(parameters)?;

        // ====== Step 2: Query grid ======

        let grid = match &config.grid {
            Some(ticks) => QueryGrid::new(ticks.y.clone(), ticks.z.clone())?,
            None => {
                let edges = |axis: SpatialAxis| {
                    mesh.edges(&config.mesh_domain, axis)
                        .ok_or_else(|| FieldError::MeshUnavailable {
                            domain: config.mesh_domain.clone(),
                            axis: axis.label(),
                        })
                };
                QueryGrid::from_dimensionless(&edges(SpatialAxis::Y)?, &edges(SpatialAxis::Z)?, &scales)?
            }
        };

        let (nz, ny) = grid.shape();
        log::debug!("Query grid: {nz} z ticks × {ny} y ticks");

        // ====== Step 3: Triangulation ======

        // Series-only datasets never touch the scatter positions
        let gridder = if dataset.fields().iter().any(FieldName::is_spatial) {
            let scale = match config.scatter_units {
                CoordinateUnits::Dimensionless => scales.length(),
                CoordinateUnits::Dimensional => 1.0,
            };
            Some(ScatteredGridder::new(&dataset.positions(scale), &grid, &config.method)?)
        } else {
            log::debug!("No spatial fields, skipping triangulation");
            None
        };

        let outside_nodes = gridder.as_ref().map_or(0, |g| g.locations().outside_count());
        if outside_nodes > 0 {
            log::warn!(
                "{outside_nodes} of {} grid nodes lie outside the scatter convex hull and will be NaN",
                grid.len()
            );
        }

        // ====== Step 4: Spatial fields ======

        let time = dataset.time_axis().clone();
        let mut fields = BTreeMap::new();

        if let Some(gridder) = &gridder {
            for field in dataset.fields() {
                let Some(samples) = dataset.spatial(field) else {
                    continue;
                };
                let series = gridder.interpolate_series(samples)?;
                log::debug!(
                    "Resolved {} onto the query grid ({} time samples)",
                    field.dataset_key(),
                    time.len()
                );
                fields.insert(field, FieldInterpolant::spatial(field, time.clone(), series)?);
            }
        }

        // ====== Step 5: Series fields ======

        for field in dataset.fields() {
            let Some(samples) = dataset.series(field) else {
                continue;
            };
            fields.insert(field, FieldInterpolant::series(field, time.clone(), samples.to_owned())?);
        }

        log::info!(
            "Reference model built: {} field(s), {nz} × {ny} grid, {} time samples, {} interpolation",
            fields.len(),
            time.len(),
            config.method.name()
        );

        Ok(Self {
            grid,
            scales,
            time,
            fields,
            method: config.method.name().to_string(),
            outside_nodes,
        })
    }

    // ========================================== Queries ==========================================

    /// Interpolant of `field`
    ///
    /// # Errors
    ///
    /// `MissingField` if the dataset did not provide `field`.
    pub fn field(&self, field: FieldName) -> Result<&FieldInterpolant> {
        self.fields.get(&field).ok_or(FieldError::MissingField(field))
    }

    /// Value of `field` at dimensional time `t`
    ///
    /// Spatial fields return a `[z, y]` grid, series fields a scalar.
    pub fn evaluate(&self, field: FieldName, t: f64) -> Result<FieldValue> {
        self.field(field)?.evaluate(t)
    }

    /// Whether `field` is available
    pub fn contains(&self, field: FieldName) -> bool {
        self.fields.contains_key(&field)
    }

    /// Available fields, in [`FieldName`] order
    pub fn available_fields(&self) -> Vec<FieldName> {
        self.fields.keys().copied().collect()
    }

    /// Dimensional query grid
    pub fn grid(&self) -> &QueryGrid {
        &self.grid
    }

    /// Characteristic scales
    pub fn scales(&self) -> &CharacteristicScales {
        &self.scales
    }

    /// Sampled times (dimensional)
    pub fn time_axis(&self) -> &TimeAxis {
        &self.time
    }

    /// Spatial interpolation method name
    pub fn method_name(&self) -> &str {
        &self.method
    }

    /// Number of grid nodes outside the scatter convex hull
    pub fn outside_nodes(&self) -> usize {
        self.outside_nodes
    }
}
