//! fieldref: Reference Field Comparison Framework
//!
//! Builds a reference solution from an externally produced scattered
//! spatio-temporal dataset and compares candidate solutions against it.
//!
//! # Architecture
//!
//! fieldref is built on two core principles:
//!
//! 1. **Separation of Data and Numerics**
//!    - The reference dataset defines the data (what to interpolate)
//!    - Interpolation methods provide the numerics (how to interpolate)
//!
//! 2. **Injected Services**
//!    - Characteristic scales, mesh geometry and candidate solutions are
//!      small traits, implemented by closures or in-memory types
//!
//! # Quick Start
//!
//! ```rust
//! use fieldref::prelude::*;
//! use ndarray::Array2;
//!
//! # fn main() -> fieldref::Result<()> {
//! // 1. Scattered dataset: 4 non-dimensional positions, 2 time samples
//! let dataset = ScatteredDataset::builder(
//!     vec![0.0, 600.0],
//!     vec![0.0, 1.0, 0.0, 1.0],
//!     vec![0.0, 0.0, 1.0, 1.0],
//! )
//! .spatial(
//!     FieldName::NegativeCollectorPotential,
//!     Array2::from_shape_fn((4, 2), |(k, t)| 0.01 * k as f64 - 0.001 * t as f64),
//! )
//! .series(FieldName::TerminalVoltage, vec![4.2, 4.1])
//! .build()?;
//!
//! // 2. Build the reference on the mesh edges
//! let model = ReferenceModel::build(
//!     &dataset,
//!     &EdgeMesh::uniform("current collector", 1.0, 1.0, 5, 5),
//!     &ParameterValues::new(0.1, 3600.0),
//!     &ReferenceConfiguration::default(),
//! )?;
//!
//! // 3. Compare a candidate voltage, evaluated at non-dimensional times
//! let candidate = |t: &[f64]| t.iter().map(|&t| 4.2 - 0.6 * t).collect::<Vec<f64>>();
//! let comparison = Comparator::new(&model, ErrorMode::Absolute)
//!     .compare_series(FieldName::TerminalVoltage, &candidate, &[0.0, 300.0, 600.0])?;
//!
//! // 4. Access results
//! assert!(comparison.summary().max < 1e-9);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`reference`]: Scattered dataset, reference model construction and queries
//! - [`comparison`]: Candidate vs reference error fields
//! - [`interpolation`]: Triangulation, scattered and temporal interpolation
//! - [`external`]: Injected services (scales, mesh, candidates)
//! - [`output`]: CSV export of comparison results

pub mod comparison;
pub mod error;
pub mod external;
pub mod fields;
pub mod grid;
pub mod interpolation;
pub mod output;
pub mod reference;
pub mod scaling;

pub use error::{ErrorKind, FieldError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use fieldref::prelude::*;
    //! ```
    pub use crate::comparison::{Comparator,
                                ErrorMode,
                                ErrorSummary,
                                FieldComparison,
                                SeriesComparison};
    pub use crate::error::{FieldError, Result};
    pub use crate::external::{CandidateField,
                              CandidateSeries,
                              EdgeMesh,
                              GridOrientation,
                              MeshGeometry,
                              ParameterSource,
                              ParameterValues};
    pub use crate::fields::{FieldKind, FieldName, FieldValue};
    pub use crate::grid::QueryGrid;
    pub use crate::reference::{ReferenceConfiguration,
                               ReferenceModel,
                               ScatteredDataset};
    pub use crate::scaling::CharacteristicScales;
}
