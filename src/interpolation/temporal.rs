//! Time axis and temporal resampling
//!
//! A [`TemporalResampler`] owns samples whose **last** axis is time and
//! answers "what is the value at time `t`" for any `t` inside the sampled
//! range, delegating the blend to a [`TimeInterpolator`].
//!
//! Times outside `[t_min, t_max]` are an error, never clamped or
//! extrapolated.

use ndarray::{ArrayD, ArrayViewD};

use crate::error::{ensure_increasing, FieldError, Result};
use crate::interpolation::methods::PiecewiseLinear;
use crate::interpolation::traits::TimeInterpolator;

// =================================================================================================
// Time axis
// =================================================================================================

/// Position of a query time relative to the samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket {
    /// Exactly the sampled instant at this index
    Exact(usize),

    /// Strictly between samples `lower` and `lower + 1`
    Between {
        /// Index of the earlier sample
        lower: usize,

        /// Fraction of the interval elapsed, in `(0, 1)`
        weight: f64,
    },
}

/// Strictly increasing sequence of sampled times (dimensional)
///
/// # Example
///
/// ```rust
/// use fieldref::interpolation::{Bracket, TimeAxis};
///
/// let axis = TimeAxis::new(vec![0.0, 10.0, 20.0, 40.0]).unwrap();
/// assert_eq!(axis.bracket(10.0).unwrap(), Bracket::Exact(1));
/// assert_eq!(axis.bracket(30.0).unwrap(), Bracket::Between { lower: 2, weight: 0.5 });
/// assert!(axis.bracket(41.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    times: Vec<f64>,
}

impl TimeAxis {
    /// Minimum number of samples
    pub const MIN_LEN: usize = 2;

    /// Below this length a `warn` is logged
    pub const RECOMMENDED_LEN: usize = 4;

    /// Create from sampled times
    ///
    /// # Errors
    ///
    /// `NonIncreasingAxis` if `times` is not finite and strictly increasing,
    /// `InsufficientData` if it holds fewer than two samples.
    pub fn new(times: Vec<f64>) -> Result<Self> {
        ensure_increasing("time", &times)?;

        if times.len() < Self::MIN_LEN {
            return Err(FieldError::insufficient_data(format!(
                "time axis holds {} sample(s), at least {} are required",
                times.len(),
                Self::MIN_LEN
            )));
        }

        if times.len() < Self::RECOMMENDED_LEN {
            log::warn!(
                "Time axis holds only {} samples, at least {} are recommended",
                times.len(),
                Self::RECOMMENDED_LEN
            );
        }

        Ok(Self { times })
    }

    /// Sampled times
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Never true for a constructed axis
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// First sampled time
    pub fn start(&self) -> f64 {
        self.times[0]
    }

    /// Last sampled time
    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Whether `t` lies inside the sampled range
    pub fn contains(&self, t: f64) -> bool {
        t.is_finite() && t >= self.start() && t <= self.end()
    }

    /// Locate `t` between samples
    ///
    /// # Errors
    ///
    /// `TimeOutOfRange` if `t` is not finite or outside `[start, end]`.
    pub fn bracket(&self, t: f64) -> Result<Bracket> {
        if !self.contains(t) {
            return Err(FieldError::TimeOutOfRange {
                time: t,
                min: self.start(),
                max: self.end(),
            });
        }

        let upper = self.times.partition_point(|&sample| sample < t);
        if self.times[upper] == t {
            return Ok(Bracket::Exact(upper));
        }

        let lower = upper - 1;
        let weight = (t - self.times[lower]) / (self.times[upper] - self.times[lower]);
        Ok(Bracket::Between { lower, weight })
    }
}

// =================================================================================================
// Temporal resampler
// =================================================================================================

/// Samples along a time axis with a time interpolator
#[derive(Debug)]
pub struct TemporalResampler {
    axis: TimeAxis,
    samples: ArrayD<f64>,
    method: Box<dyn TimeInterpolator>,
}

impl TemporalResampler {
    /// Create from samples whose last axis is time
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `samples` is 0-dimensional or its last axis does
    /// not match `axis.len()`.
    pub fn new(axis: TimeAxis, samples: ArrayD<f64>, method: Box<dyn TimeInterpolator>) -> Result<Self> {
        let shape = samples.shape();
        if shape.last() != Some(&axis.len()) {
            let mut expected = shape.to_vec();
            match expected.last_mut() {
                Some(last) => *last = axis.len(),
                None => expected.push(axis.len()),
            }
            return Err(FieldError::shape_mismatch("time samples", &expected, shape));
        }

        Ok(Self { axis, samples, method })
    }

    /// Create with piecewise-linear time interpolation
    pub fn linear(axis: TimeAxis, samples: ArrayD<f64>) -> Result<Self> {
        Self::new(axis, samples, Box::new(PiecewiseLinear::new()))
    }

    /// Time axis
    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    /// Stored samples, time last
    pub fn samples(&self) -> ArrayViewD<'_, f64> {
        self.samples.view()
    }

    /// Time interpolator name
    pub fn method_name(&self) -> &str {
        self.method.name()
    }

    /// Value at dimensional time `t`
    pub fn evaluate(&self, t: f64) -> Result<ArrayD<f64>> {
        self.method.interpolate(&self.axis, self.samples.view(), t)
    }

    /// Values at each time of `ts`; fails on the first out-of-range time
    pub fn evaluate_many(&self, ts: &[f64]) -> Result<Vec<ArrayD<f64>>> {
        ts.iter().map(|&t| self.evaluate(t)).collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
