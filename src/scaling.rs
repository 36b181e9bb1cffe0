//! Dimensional / non-dimensional coordinate conversion
//!
//! Two unit conventions coexist:
//!
//! - **dimensional**: physical units (metres, seconds), used by the reference
//!   dataset, the query grid and every gridded time series;
//! - **non-dimensional**: scaled by a characteristic length `L` and a
//!   characteristic timescale `τ`, used by the candidate solver and its mesh.
//!
//! ```text
//! x_dim = x_nd * L        x_nd = x_dim / L
//! t_dim = t_nd * τ        t_nd = t_dim / τ
//! ```
//!
//! Both y and z are scaled by the same length.

use crate::error::{FieldError, Result};
use crate::external::ParameterSource;

// =================================================================================================
// Scale parameters
// =================================================================================================

/// Symbolic quantities resolved by the parameter service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleParameter {
    /// Characteristic length of the cross-section (`L_z`)
    CharacteristicLength,

    /// Characteristic discharge timescale (`tau_discharge`)
    DischargeTimescale,
}

impl ScaleParameter {
    /// Symbolic name used by parameter sets
    pub fn symbol(&self) -> &'static str {
        match self {
            ScaleParameter::CharacteristicLength => "L_z",
            ScaleParameter::DischargeTimescale => "tau_discharge",
        }
    }
}

// =================================================================================================
// Characteristic scales
// =================================================================================================

/// Characteristic length and timescale of one comparison run
///
/// Construction guarantees both scales are finite and non-zero, and the length
/// positive, so every conversion below is well defined.
///
/// # Example
///
/// ```rust
/// use fieldref::scaling::CharacteristicScales;
///
/// let scales = CharacteristicScales::new(0.137, 3600.0).unwrap();
/// assert_eq!(scales.to_dimensional_length(1.0), 0.137);
/// assert_eq!(scales.to_dimensionless_time(1800.0), 0.5);
///
/// assert!(CharacteristicScales::new(0.137, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicScales {
    length: f64,
    timescale: f64,
}

impl CharacteristicScales {
    /// Create from explicit values
    ///
    /// # Errors
    ///
    /// `InvalidScale` if either value is zero or not finite, or if the
    /// length is negative (mesh edges scaled by it would run backwards).
    pub fn new(length: f64, timescale: f64) -> Result<Self> {
        let length = checked(ScaleParameter::CharacteristicLength, length)?;
        if length < 0.0 {
            return Err(FieldError::InvalidScale {
                parameter: ScaleParameter::CharacteristicLength.symbol(),
                value: length,
            });
        }
        let timescale = checked(ScaleParameter::DischargeTimescale, timescale)?;
        Ok(Self { length, timescale })
    }

    /// Resolve both scales from a parameter service
    ///
    /// # Errors
    ///
    /// `ScaleUnavailable` if the service cannot resolve a parameter,
    /// `InvalidScale` if it resolves to a value [`new`](Self::new) rejects.
    pub fn from_parameters(parameters: &dyn ParameterSource) -> Result<Self> {
        let resolve = |parameter: ScaleParameter| {
            parameters
                .evaluate(parameter)
                .ok_or(FieldError::ScaleUnavailable { parameter: parameter.symbol() })
        };

        let length = resolve(ScaleParameter::CharacteristicLength)?;
        let timescale = resolve(ScaleParameter::DischargeTimescale)?;

        let scales = Self::new(length, timescale)?;
        log::debug!("Characteristic scales: L = {length}, tau = {timescale}");
        Ok(scales)
    }

    /// Characteristic length `L`
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Characteristic timescale `τ`
    pub fn timescale(&self) -> f64 {
        self.timescale
    }

    // ========================================== Space ==========================================

    /// Non-dimensional → dimensional length
    pub fn to_dimensional_length(&self, x: f64) -> f64 {
        x * self.length
    }

    /// Dimensional → non-dimensional length
    pub fn to_dimensionless_length(&self, x: f64) -> f64 {
        x / self.length
    }

    /// Non-dimensional → dimensional, elementwise
    pub fn to_dimensional_lengths(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.to_dimensional_length(x)).collect()
    }

    /// Dimensional → non-dimensional, elementwise
    pub fn to_dimensionless_lengths(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.to_dimensionless_length(x)).collect()
    }

    // ========================================== Time ==========================================

    /// Non-dimensional → dimensional time
    pub fn to_dimensional_time(&self, t: f64) -> f64 {
        t * self.timescale
    }

    /// Dimensional → non-dimensional time
    pub fn to_dimensionless_time(&self, t: f64) -> f64 {
        t / self.timescale
    }

    /// Dimensional → non-dimensional, elementwise
    pub fn to_dimensionless_times(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|&t| self.to_dimensionless_time(t)).collect()
    }
}

fn checked(parameter: ScaleParameter, value: f64) -> Result<f64> {
    if value == 0.0 || !value.is_finite() {
        return Err(FieldError::InvalidScale {
            parameter: parameter.symbol(),
            value,
        });
    }
    Ok(value)
}

// =================================================================================================
// Tests
// =================================================================================================
