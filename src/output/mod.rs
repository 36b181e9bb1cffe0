//! Output of comparison results
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! Rendering is left to external tools: the exported CSV files carry the
//! grid coordinates, both solutions and the error for every node.

pub mod export;
