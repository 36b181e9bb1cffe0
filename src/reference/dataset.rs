//! Scattered reference dataset
//!
//! The reference solution arrives as an irregular cloud of `(y, z)`
//! positions sharing one time axis. Each field is either
//!
//! - **spatial**: one value per position and time, shaped `[points, times]`,
//! - **series**: one value per time, shaped `[times]`.
//!
//! Two ingestion paths produce the same validated [`ScatteredDataset`]:
//!
//! - [`DatasetRecord`]: the raw export, string-keyed dynamic arrays;
//! - [`ScatteredDatasetBuilder`]: typed field names and arrays.

use nalgebra::Point2;
use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, Ix1, Ix2};
use std::collections::{BTreeMap, HashMap};

use crate::error::{FieldError, Result};
use crate::fields::{FieldKind, FieldName};
use crate::interpolation::TimeAxis;

// =================================================================================================
// Raw record
// =================================================================================================

/// Raw dataset export
///
/// Keys of `fields` are the dataset keys of [`FieldName`] (`"voltage"`,
/// `"phi_s_cn"`, ...). Spatial arrays are `[points, times]`, series arrays
/// `[times]`.
#[derive(Debug, Clone, Default)]
pub struct DatasetRecord {
    /// Sampled times
    pub time: Vec<f64>,

    /// y coordinate of each position
    pub y: Vec<f64>,

    /// z coordinate of each position
    pub z: Vec<f64>,

    /// Field arrays keyed by dataset key
    pub fields: HashMap<String, ArrayD<f64>>,
}

// =================================================================================================
// Validated dataset
// =================================================================================================

/// Validated scattered dataset
///
/// # Example
///
/// ```rust
/// use fieldref::fields::FieldName;
/// use fieldref::reference::ScatteredDataset;
/// use ndarray::Array2;
///
/// let dataset = ScatteredDataset::builder(
///     vec![0.0, 1.0],
///     vec![0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0],
/// )
/// .series(FieldName::TerminalVoltage, vec![4.1, 4.0])
/// .spatial(FieldName::Temperature, Array2::from_elem((3, 2), 298.15))
/// .build()
/// .unwrap();
///
/// assert_eq!(dataset.point_count(), 3);
/// assert_eq!(dataset.fields(), vec![FieldName::TerminalVoltage, FieldName::Temperature]);
/// ```
#[derive(Debug, Clone)]
pub struct ScatteredDataset {
    time: TimeAxis,
    y: Vec<f64>,
    z: Vec<f64>,
    spatial: BTreeMap<FieldName, Array2<f64>>,
    series: BTreeMap<FieldName, Array1<f64>>,
}

impl ScatteredDataset {
    /// Start a typed dataset
    pub fn builder(time: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> ScatteredDatasetBuilder {
        ScatteredDatasetBuilder {
            time,
            y,
            z,
            spatial: Vec::new(),
            series: Vec::new(),
        }
    }

    /// Validate a raw export
    ///
    /// # Errors
    ///
    /// - `UnknownField` for a key outside the field vocabulary
    /// - `ShapeMismatch` for arrays of the wrong dimensionality or length
    /// - `NonIncreasingAxis` / `InsufficientData` for a bad time axis
    pub fn from_record(record: DatasetRecord) -> Result<Self> {
        let mut builder = Self::builder(record.time, record.y, record.z);
        let points = builder.y.len();
        let times = builder.time.len();

        // sorted for deterministic error reporting
        let mut fields: Vec<(String, ArrayD<f64>)> = record.fields.into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, array) in fields {
            let field: FieldName = key.parse()?;
            let actual = array.shape().to_vec();

            builder = match field.kind() {
                FieldKind::Spatial => {
                    let array = array
                        .into_dimensionality::<Ix2>()
                        .map_err(|_| FieldError::shape_mismatch(key.as_str(), &[points, times], &actual))?;
                    builder.spatial(field, array)
                }
                FieldKind::Series => {
                    let array = array
                        .into_dimensionality::<Ix1>()
                        .map_err(|_| FieldError::shape_mismatch(key.as_str(), &[times], &actual))?;
                    builder.series(field, array)
                }
            };
        }

        builder.build()
    }

    /// Shared time axis
    pub fn time_axis(&self) -> &TimeAxis {
        &self.time
    }

    /// Number of positions (duplicates included)
    pub fn point_count(&self) -> usize {
        self.y.len()
    }

    /// Number of time samples
    pub fn time_count(&self) -> usize {
        self.time.len()
    }

    /// y coordinates, units as provided
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// z coordinates, units as provided
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Positions as `(y, z)` points, optionally scaled
    pub fn positions(&self, scale: f64) -> Vec<Point2<f64>> {
        self.y
            .iter()
            .zip(&self.z)
            .map(|(&y, &z)| Point2::new(y * scale, z * scale))
            .collect()
    }

    /// Fields present, in [`FieldName`] order
    pub fn fields(&self) -> Vec<FieldName> {
        let mut fields: Vec<FieldName> = self.series.keys().chain(self.spatial.keys()).copied().collect();
        fields.sort();
        fields
    }

    /// Whether the dataset provides `field`
    pub fn contains(&self, field: FieldName) -> bool {
        self.spatial.contains_key(&field) || self.series.contains_key(&field)
    }

    /// Spatial field samples, `[points, times]`
    pub fn spatial(&self, field: FieldName) -> Option<ArrayView2<'_, f64>> {
        self.spatial.get(&field).map(Array2::view)
    }

    /// Series field samples, `[times]`
    pub fn series(&self, field: FieldName) -> Option<ArrayView1<'_, f64>> {
        self.series.get(&field).map(Array1::view)
    }
}

// =================================================================================================
// Builder
// =================================================================================================

/// Typed construction of a [`ScatteredDataset`]
#[derive(Debug, Clone)]
pub struct ScatteredDatasetBuilder {
    time: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    spatial: Vec<(FieldName, Array2<f64>)>,
    series: Vec<(FieldName, Array1<f64>)>,
}

impl ScatteredDatasetBuilder {
    /// Add a spatial field shaped `[points, times]`
    pub fn spatial(mut self, field: FieldName, samples: Array2<f64>) -> Self {
        self.spatial.push((field, samples));
        self
    }

    /// Add a series field shaped `[times]`
    pub fn series(mut self, field: FieldName, samples: impl Into<Array1<f64>>) -> Self {
        self.series.push((field, samples.into()));
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<ScatteredDataset> {
        let time = TimeAxis::new(self.time)?;

        if self.y.len() != self.z.len() {
            return Err(FieldError::shape_mismatch(
                "scatter coordinates",
                &[self.y.len()],
                &[self.z.len()],
            ));
        }

        let points = self.y.len();
        let times = time.len();

        let mut spatial = BTreeMap::new();
        for (field, samples) in self.spatial {
            if !field.is_spatial() {
                return Err(FieldError::shape_mismatch(field.dataset_key(), &[times], samples.shape()));
            }
            if samples.dim() != (points, times) {
                return Err(FieldError::shape_mismatch(
                    field.dataset_key(),
                    &[points, times],
                    samples.shape(),
                ));
            }
            if spatial.insert(field, samples).is_some() {
                return Err(FieldError::invalid_configuration(format!(
                    "field `{}` given twice",
                    field.dataset_key()
                )));
            }
        }

        let mut series = BTreeMap::new();
        for (field, samples) in self.series {
            if field.is_spatial() {
                return Err(FieldError::shape_mismatch(
                    field.dataset_key(),
                    &[points, times],
                    samples.shape(),
                ));
            }
            if samples.len() != times {
                return Err(FieldError::shape_mismatch(field.dataset_key(), &[times], samples.shape()));
            }
            if series.insert(field, samples).is_some() {
                return Err(FieldError::invalid_configuration(format!(
                    "field `{}` given twice",
                    field.dataset_key()
                )));
            }
        }

        log::debug!(
            "Scattered dataset: {points} positions, {times} time samples, {} field(s)",
            spatial.len() + series.len()
        );

        Ok(ScatteredDataset {
            time,
            y: self.y,
            z: self.z,
            spatial,
            series,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
