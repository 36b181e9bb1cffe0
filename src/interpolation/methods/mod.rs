//! Interpolation methods
//!
//! Concrete implementations of the [`ScatteredInterpolator`] and
//! [`TimeInterpolator`] traits.
//!
//! # Available Methods
//!
//! ## Scattered (space)
//!
//! - **[`CloughTocher`]**: piecewise-cubic, C1-continuous (default)
//!   - Reproduces linear fields exactly
//!   - Needs a global gradient-estimation pass per time slice
//!
//! - **[`LinearBarycentric`]**: piecewise-linear
//!   - C0 only, no overshoot
//!   - One weighted sum per grid node
//!
//! ## Time
//!
//! - **[`PiecewiseLinear`]**: linear between bracketing samples
//!
//! [`ScatteredInterpolator`]: crate::interpolation::ScatteredInterpolator
//! [`TimeInterpolator`]: crate::interpolation::TimeInterpolator

pub mod barycentric;
pub mod clough_tocher;
pub mod linear;

pub use barycentric::LinearBarycentric;
pub use clough_tocher::CloughTocher;
pub use linear::PiecewiseLinear;
