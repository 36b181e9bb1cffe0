//! Candidate vs reference comparison
//!
//! - **`comparator`**: [`Comparator`], [`ErrorMode`] and the comparison
//!   results
//! - **`summary`**: [`ErrorSummary`] statistics for reporting

pub mod comparator;
pub mod summary;

pub use comparator::{Comparator, ErrorMode, FieldComparison, SeriesComparison};
pub use summary::ErrorSummary;
