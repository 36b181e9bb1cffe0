//! Reference model
//!
//! The reference solution is an externally produced scattered dataset. This
//! module validates it, resolves every field onto a rectangular query grid
//! and exposes the result as time-continuous interpolants.
//!
//! # Module Organization
//!
//! - **`dataset`**: [`ScatteredDataset`], its builder and the raw
//!   [`DatasetRecord`]
//! - **`config`**: [`ReferenceConfiguration`]
//! - **`interpolant`**: [`FieldInterpolant`], one per field
//! - **`model`**: [`ReferenceModel`], construction and queries
//!
//! # Units
//!
//! The query grid, the gridded series and every query time are
//! dimensional. Scatter positions are non-dimensional unless the
//! configuration declares them dimensional.

pub mod config;
pub mod dataset;
pub mod interpolant;
pub mod model;

pub use config::{CoordinateUnits, GridTicks, ReferenceConfiguration, DEFAULT_MESH_DOMAIN};
pub use dataset::{DatasetRecord, ScatteredDataset, ScatteredDatasetBuilder};
pub use interpolant::{FieldInterpolant, GriddedTimeSeries};
pub use model::ReferenceModel;
