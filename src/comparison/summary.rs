//! Error statistics for reporting

use std::fmt;

/// Summary statistics of an error array
///
/// Statistics are taken over finite entries only; NaN (outside the convex
/// hull) and infinite entries (relative mode at a zero reference) are
/// counted separately.
///
/// # Example
///
/// ```rust
/// use fieldref::comparison::ErrorSummary;
///
/// let summary = ErrorSummary::from_values([3.0, 4.0, f64::NAN]);
/// assert_eq!(summary.max, 4.0);
/// assert_eq!(summary.mean, 3.5);
/// assert_eq!(summary.non_finite_count, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    /// Largest finite error
    pub max: f64,

    /// Mean of the finite errors
    pub mean: f64,

    /// Root mean square of the finite errors
    pub rms: f64,

    /// Number of finite entries
    pub finite_count: usize,

    /// Number of NaN or infinite entries
    pub non_finite_count: usize,
}

impl ErrorSummary {
    /// Summarise a sequence of error values
    ///
    /// With no finite entry, `max`, `mean` and `rms` are NaN.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut finite_count = 0usize;
        let mut non_finite_count = 0usize;

        for value in values {
            if value.is_finite() {
                max = max.max(value);
                sum += value;
                sum_squares += value * value;
                finite_count += 1;
            } else {
                non_finite_count += 1;
            }
        }

        if finite_count == 0 {
            return Self {
                max: f64::NAN,
                mean: f64::NAN,
                rms: f64::NAN,
                finite_count,
                non_finite_count,
            };
        }

        let n = finite_count as f64;
        Self {
            max,
            mean: sum / n,
            rms: (sum_squares / n).sqrt(),
            finite_count,
            non_finite_count,
        }
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max = {:.3e}, mean = {:.3e}, rms = {:.3e} ({} finite, {} non-finite)",
            self.max, self.mean, self.rms, self.finite_count, self.non_finite_count
        )
    }
}
