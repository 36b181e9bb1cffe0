//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{LinearSeries, MissingScales, PlanarField};
pub use test_helpers::{
    assert_arrays_close,
    build_model,
    irregular_positions,
    lattice_positions,
    planar_dataset,
};
