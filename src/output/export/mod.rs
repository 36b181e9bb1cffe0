//! Export module for comparison results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a new
//! format is a new file.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use fieldref::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//! exporter.export_field(&comparison, Path::new("phi_s_cn_abs.csv"))?;
//! exporter.export_series(&voltage, Path::new("voltage.csv"))?;
//! ```

pub mod csv;

pub use csv::{
    export_field_comparison_csv, export_series_comparison_csv, CsvConfig, CsvExporter, CsvMetadata,
};

use std::path::Path;

use crate::comparison::{FieldComparison, SeriesComparison};

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format reports its own error type, so callers can react precisely
/// without boxing.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports a spatial field comparison, one record per grid node.
    ///
    /// # Errors
    ///
    /// Returns an error if the comparison arrays are inconsistent or the
    /// path cannot be written.
    fn export_field(&self, comparison: &FieldComparison, path: &Path) -> Result<(), Self::Error>;

    /// Exports a series comparison, one record per time.
    fn export_series(&self, comparison: &SeriesComparison, path: &Path) -> Result<(), Self::Error>;
}
