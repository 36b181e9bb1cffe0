//! Per-field interpolants
//!
//! A [`FieldInterpolant`] is the time-continuous form of one reference field:
//! a pure function of dimensional time, backed by samples already resolved
//! onto the query grid (spatial fields) or kept as-is (series fields).

use ndarray::{Array1, Array3, ArrayView3, Ix0, Ix2, Ix3};

use crate::error::{FieldError, Result};
use crate::fields::{FieldKind, FieldName, FieldValue};
use crate::interpolation::{TemporalResampler, TimeAxis};

/// Spatial field on the query grid, indexed `[z-tick, y-tick, time-sample]`
pub type GriddedTimeSeries = Array3<f64>;

/// Time-continuous reference field
#[derive(Debug)]
pub struct FieldInterpolant {
    field: FieldName,
    resampler: TemporalResampler,
}

impl FieldInterpolant {
    /// Wrap a gridded spatial field
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `field` is not spatial, `ShapeMismatch` if
    /// the time extent of `series` does not match `axis`.
    pub fn spatial(field: FieldName, axis: TimeAxis, series: GriddedTimeSeries) -> Result<Self> {
        if !field.is_spatial() {
            return Err(FieldError::invalid_configuration(format!(
                "`{}` is not a spatial field",
                field.dataset_key()
            )));
        }
        let resampler = TemporalResampler::linear(axis, series.into_dyn())?;
        Ok(Self { field, resampler })
    }

    /// Wrap a scalar time series
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `field` is spatial, `ShapeMismatch` if
    /// `samples` does not match `axis`.
    pub fn series(field: FieldName, axis: TimeAxis, samples: Array1<f64>) -> Result<Self> {
        if field.is_spatial() {
            return Err(FieldError::invalid_configuration(format!(
                "`{}` is not a series field",
                field.dataset_key()
            )));
        }
        let resampler = TemporalResampler::linear(axis, samples.into_dyn())?;
        Ok(Self { field, resampler })
    }

    /// Field this interpolant represents
    pub fn field(&self) -> FieldName {
        self.field
    }

    /// Spatial or series
    pub fn kind(&self) -> FieldKind {
        self.field.kind()
    }

    /// Sampled times
    pub fn time_axis(&self) -> &TimeAxis {
        self.resampler.axis()
    }

    /// Gridded samples `[z, y, time]`, `None` for series fields
    pub fn gridded(&self) -> Option<ArrayView3<'_, f64>> {
        self.resampler.samples().into_dimensionality::<Ix3>().ok()
    }

    /// Value at dimensional time `t`
    ///
    /// # Errors
    ///
    /// `TimeOutOfRange` if `t` is not finite or outside the sampled range.
    pub fn evaluate(&self, t: f64) -> Result<FieldValue> {
        let value = self.resampler.evaluate(t)?;
        let actual = value.shape().to_vec();
        let stored = self.resampler.samples();
        let expected = &stored.shape()[..stored.ndim() - 1];
        let mismatch = |_| FieldError::shape_mismatch(self.field.dataset_key(), expected, &actual);

        match self.kind() {
            FieldKind::Spatial => value
                .into_dimensionality::<Ix2>()
                .map(FieldValue::Grid)
                .map_err(mismatch),
            FieldKind::Series => value
                .into_dimensionality::<Ix0>()
                .map(|scalar| FieldValue::Scalar(scalar.into_scalar()))
                .map_err(mismatch),
        }
    }

    /// Values at each time of `ts`
    pub fn evaluate_many(&self, ts: &[f64]) -> Result<Vec<FieldValue>> {
        ts.iter().map(|&t| self.evaluate(t)).collect()
    }
}
