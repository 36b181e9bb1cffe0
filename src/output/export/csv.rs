//! CSV export of comparison results
//!
//! Writes [`FieldComparison`] and [`SeriesComparison`] results as CSV, for
//! plotting or post-processing in pandas, MATLAB or a spreadsheet.
//!
//! # Features
//!
//! - **Metadata header**: optional `#` comment lines (timestamp, scales,
//!   interpolation method, error summary)
//! - **Customizable**: delimiter, decimal separator, precision
//! - **NaN preserved**: nodes outside the scatter convex hull are written as
//!   `NaN` (or a configured token), not dropped
//!
//! # Field layout
//!
//! One row per grid node, z-major:
//!
//! ```csv
//! # Reference Field Comparison
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Field: X-averaged cell temperature [K]
//! # Mode: abs
//! # Time: 1800 s
//! #
//! y (m),z (m),candidate (K),reference (K),error
//! 0.000000,0.000000,298.150000,298.140000,0.010000
//! ...
//! ```
//!
//! # Series layout
//!
//! ```csv
//! time (s),candidate (V),reference (V),error
//! 0.000000,4.100000,4.100000,0.000000
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::comparison::{ErrorSummary, FieldComparison, SeriesComparison};
use crate::error::{FieldError, Result};
use crate::output::export::Exporter;
use crate::reference::ReferenceModel;

// =============================================================================
// Formatting
// =============================================================================

/// Number formatting and header options
///
/// # Example
///
/// ```rust
/// use fieldref::output::export::CsvConfig;
///
/// let config = CsvConfig::european().precision(10).missing("");
/// assert_eq!(config.delimiter, ';');
/// assert_eq!(config.decimal_separator, ',');
/// assert_eq!(config.missing_value, "");
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field separator, `,` unless overridden
    pub delimiter: char,

    /// Character replacing `.` in numbers
    pub decimal_separator: char,

    /// Digits after the decimal point (6 by default)
    pub precision: usize,

    /// Text written for NaN entries (nodes outside the scatter hull)
    pub missing_value: String,

    /// Write the `#` comment header
    pub include_metadata: bool,

    /// Content of the comment header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            missing_value: "NaN".to_string(),
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon-separated, comma decimal mark
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: set the NaN token
    pub fn missing(mut self, token: impl Into<String>) -> Self {
        self.missing_value = token.into();
        self
    }

    /// Builder pattern: enable the comment header
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Content of the `#` comment header
///
/// Only non-`None` fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Name of the candidate model (e.g., "2+1D SPMeCC")
    pub candidate_name: Option<String>,

    /// Spatial interpolation method of the reference
    pub method: Option<String>,

    /// Characteristic length L (m)
    pub characteristic_length: Option<f64>,

    /// Characteristic timescale τ (s)
    pub timescale: Option<f64>,

    /// Extra `key: value` lines
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing a reference model
    pub fn from_model(model: &ReferenceModel) -> Self {
        Self {
            method: Some(model.method_name().to_string()),
            characteristic_length: Some(model.scales().length()),
            timescale: Some(model.scales().timescale()),
            ..Default::default()
        }
    }

    /// Builder pattern: name the candidate model
    pub fn with_candidate(mut self, name: impl Into<String>) -> Self {
        self.candidate_name = Some(name.into());
        self
    }

    /// Append an extra header line
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(
    writer: &mut W,
    metadata: &CsvMetadata,
    details: &[(&str, String)],
) -> std::io::Result<()> {
    writeln!(writer, "# Reference Field Comparison")?;

    let now = chrono::Utc::now();
    writeln!(writer, "# Generated: {}", now.to_rfc3339())?;

    for (key, value) in details {
        writeln!(writer, "# {key}: {value}")?;
    }

    if let Some(candidate) = &metadata.candidate_name {
        writeln!(writer, "# Candidate: {candidate}")?;
    }
    if let Some(method) = &metadata.method {
        writeln!(writer, "# Interpolation: {method}")?;
    }
    if let Some(length) = metadata.characteristic_length {
        writeln!(writer, "# Characteristic Length: {length} m")?;
    }
    if let Some(timescale) = metadata.timescale {
        writeln!(writer, "# Timescale: {timescale} s")?;
    }

    for (key, value) in &metadata.custom {
        writeln!(writer, "# {key}: {value}")?;
    }

    writeln!(writer, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    if value.is_nan() {
        return config.missing_value.clone();
    }

    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn write_row<W: Write>(writer: &mut W, values: &[f64], config: &CsvConfig) -> std::io::Result<()> {
    let row: Vec<String> = values.iter().map(|&v| format_number(v, config)).collect();
    writeln!(writer, "{}", row.join(&config.delimiter.to_string()))
}

fn summary_detail(summary: ErrorSummary) -> (&'static str, String) {
    ("Error Summary", summary.to_string())
}

// =============================================================================
// Writers
// =============================================================================

/// Write a field comparison, one row per grid node
pub fn write_field_comparison<W: Write>(
    writer: &mut W,
    comparison: &FieldComparison,
    config: &CsvConfig,
) -> Result<()> {
    // ============================= Validation =============================

    let shape = [comparison.z.len(), comparison.y.len()];
    for (name, array) in [
        ("candidate", &comparison.candidate),
        ("reference", &comparison.reference),
        ("error", &comparison.error),
    ] {
        if array.shape() != shape {
            return Err(FieldError::shape_mismatch(name, &shape, array.shape()));
        }
    }

    // ============================= Write Metadata =========================

    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        let details = [
            ("Field", comparison.field.display_name().to_string()),
            ("Mode", comparison.mode.to_string()),
            ("Time", format!("{} s", comparison.time)),
            summary_detail(comparison.summary()),
        ];
        write_metadata_header(writer, metadata, &details)?;
    }

    // ============================= Write Header ===========================

    let unit = comparison.field.unit();
    let d = config.delimiter;
    writeln!(writer, "y (m){d}z (m){d}candidate ({unit}){d}reference ({unit}){d}error")?;

    // ============================= Write Data =============================

    for (iz, &z) in comparison.z.iter().enumerate() {
        for (iy, &y) in comparison.y.iter().enumerate() {
            let values = [
                y,
                z,
                comparison.candidate[[iz, iy]],
                comparison.reference[[iz, iy]],
                comparison.error[[iz, iy]],
            ];
            write_row(writer, &values, config)?;
        }
    }

    Ok(())
}

/// Write a series comparison, one row per time
pub fn write_series_comparison<W: Write>(
    writer: &mut W,
    comparison: &SeriesComparison,
    config: &CsvConfig,
) -> Result<()> {
    let n = comparison.times.len();
    for (name, values) in [
        ("candidate", &comparison.candidate),
        ("reference", &comparison.reference),
        ("error", &comparison.error),
    ] {
        if values.len() != n {
            return Err(FieldError::shape_mismatch(name, &[n], &[values.len()]));
        }
    }

    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        let details = [
            ("Field", comparison.field.display_name().to_string()),
            ("Mode", comparison.mode.to_string()),
            summary_detail(comparison.summary()),
        ];
        write_metadata_header(writer, metadata, &details)?;
    }

    let unit = comparison.field.unit();
    let d = config.delimiter;
    writeln!(writer, "time (s){d}candidate ({unit}){d}reference ({unit}){d}error")?;

    for i in 0..n {
        let values = [
            comparison.times[i],
            comparison.candidate[i],
            comparison.reference[i],
            comparison.error[i],
        ];
        write_row(writer, &values, config)?;
    }

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export a field comparison to a CSV file
///
/// # Errors
///
/// - `ShapeMismatch` if the arrays disagree with the tick sequences
/// - `Io` on file creation or write failures
pub fn export_field_comparison_csv(
    comparison: &FieldComparison,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut writer = BufWriter::new(File::create(output_path.as_ref())?);
    write_field_comparison(&mut writer, comparison, configuration)?;
    writer.flush()?;

    log::debug!(
        "Exported {} comparison to {}",
        comparison.field.dataset_key(),
        output_path.as_ref().display()
    );
    Ok(())
}

/// Export a series comparison to a CSV file
pub fn export_series_comparison_csv(
    comparison: &SeriesComparison,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut writer = BufWriter::new(File::create(output_path.as_ref())?);
    write_series_comparison(&mut writer, comparison, configuration)?;
    writer.flush()?;

    log::debug!(
        "Exported {} series comparison to {}",
        comparison.field.dataset_key(),
        output_path.as_ref().display()
    );
    Ok(())
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    /// Create with an explicit configuration
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }
}

impl Exporter for CsvExporter {
    type Error = FieldError;

    fn export_field(&self, comparison: &FieldComparison, path: &Path) -> Result<()> {
        export_field_comparison_csv(comparison, path, Some(&self.config))
    }

    fn export_series(&self, comparison: &SeriesComparison, path: &Path) -> Result<()> {
        export_series_comparison_csv(comparison, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::ErrorMode;
    use crate::fields::FieldName;
    use ndarray::{array, Array2};
    use std::fs;
    use tempfile::NamedTempFile;

    fn field_comparison() -> FieldComparison {
        let candidate = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let reference = array![[1.0, 2.5, 0.0], [4.0, f64::NAN, 6.0]];
        let error = &candidate - &reference;

        FieldComparison {
            field: FieldName::NegativeCollectorPotential,
            mode: ErrorMode::Absolute,
            time: 1800.0,
            y: vec![0.0, 0.1, 0.2],
            z: vec![0.0, 0.5],
            candidate,
            reference,
            error: error.mapv(f64::abs),
        }
    }

    fn series_comparison() -> SeriesComparison {
        SeriesComparison {
            field: FieldName::TerminalVoltage,
            mode: ErrorMode::Relative,
            times: vec![0.0, 60.0],
            candidate: vec![4.2, 4.1],
            reference: vec![4.2, 4.0],
            error: vec![0.0, 0.025],
        }
    }

    #[test]
    fn test_field_rows() {
        let mut buffer = Vec::new();
        write_field_comparison(&mut buffer, &field_comparison(), &CsvConfig::default().precision(2)).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "y (m),z (m),candidate (V),reference (V),error");
        assert_eq!(lines.len(), 1 + 6);
        assert_eq!(lines[1], "0.00,0.00,1.00,1.00,0.00");
        assert_eq!(lines[6], "0.20,0.50,6.00,6.00,0.00");
        assert!(lines[5].contains("NaN"));
    }

    #[test]
    fn test_missing_token() {
        let mut buffer = Vec::new();
        let config = CsvConfig::default().precision(1).missing("");
        write_field_comparison(&mut buffer, &field_comparison(), &config).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text.lines().nth(5), Some("0.1,0.5,5.0,,"));
    }

    #[test]
    fn test_european_format() {
        let mut buffer = Vec::new();
        write_series_comparison(&mut buffer, &series_comparison(), &CsvConfig::european().precision(3)).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("time (s);candidate (V);reference (V);error"));
        assert!(text.contains("60,000;4,100;4,000;0,025"));
    }

    #[test]
    fn test_metadata_header() {
        let metadata = CsvMetadata {
            method: Some("Clough-Tocher".to_string()),
            timescale: Some(3600.0),
            ..Default::default()
        }
        .with_candidate("2+1D SPMeCC");

        let mut buffer = Vec::new();
        let config = CsvConfig::default().with_metadata(metadata);
        write_field_comparison(&mut buffer, &field_comparison(), &config).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Reference Field Comparison\n# Generated: "));
        assert!(text.contains("# Field: Negative current collector potential [V]"));
        assert!(text.contains("# Mode: abs"));
        assert!(text.contains("# Candidate: 2+1D SPMeCC"));
        assert!(text.contains("# Interpolation: Clough-Tocher"));
        assert!(text.contains("1 non-finite"));
        assert!(text.contains("#\ny (m)"));
    }

    #[test]
    fn test_shape_validation() {
        let mut comparison = field_comparison();
        comparison.error = Array2::zeros((3, 2));

        let error = write_field_comparison(&mut Vec::new(), &comparison, &CsvConfig::default()).unwrap_err();
        assert!(matches!(error, FieldError::ShapeMismatch { ref context, .. } if context == "error"));
    }

    #[test]
    fn test_exporter_writes_files() {
        let exporter = CsvExporter::default();

        let file = NamedTempFile::new().unwrap();
        exporter.export_field(&field_comparison(), file.path()).unwrap();
        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().count(), 7);

        let file = NamedTempFile::new().unwrap();
        exporter.export_series(&series_comparison(), file.path()).unwrap();
        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("missing").join("out.csv");

        let error = export_series_comparison_csv(&series_comparison(), &path, None).unwrap_err();
        assert_eq!(error.kind(), crate::error::ErrorKind::Io);
    }
}
