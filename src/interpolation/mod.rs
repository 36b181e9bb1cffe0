//! Spatial and temporal interpolation
//!
//! # Module Organization
//!
//! - **`traits`**: [`ScatteredInterpolator`], [`TimeInterpolator`] and the
//!   [`ScatteredMethod`] selector
//! - **`triangulation`**: Delaunay triangulation and point location
//! - **`methods`**: Clough–Tocher and linear scattered schemes, linear time
//!   interpolation
//! - **`scattered`**: binding a scatter cloud to a query grid
//! - **`temporal`**: time axis and resampling along it
//!
//! # Convex hull limitation
//!
//! Scattered interpolation does not extrapolate. Grid nodes outside the
//! convex hull of the scatter positions are NaN; only the hull of sampled
//! positions is reliable.

pub mod methods;
pub mod scattered;
pub mod temporal;
pub mod traits;
pub mod triangulation;

pub use methods::{CloughTocher, LinearBarycentric, PiecewiseLinear};
pub use scattered::{griddata, ScatteredGridder};
pub use temporal::{Bracket, TemporalResampler, TimeAxis};
pub use traits::{GradientEstimation, ScatteredInterpolator, ScatteredMethod, TimeInterpolator};
pub use triangulation::{GridLocations, Location, Triangulation};
