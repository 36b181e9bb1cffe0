//! Reference fields
//!
//! This module provides the vocabulary of fields a reference dataset can
//! carry and the value type returned when a field is evaluated.
//!
//! # Core Concepts
//!
//! - **Field Name**: closed, type-safe identifier of an exported quantity
//! - **Field Kind**: whether the field is a time series or varies over (y, z)
//! - **Field Value**: a scalar or a `[z, y]` grid at one instant

pub mod quantity;
pub mod value;

pub use quantity::{FieldKind, FieldName};
pub use value::FieldValue;
