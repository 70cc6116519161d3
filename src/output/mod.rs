//! Output module for pipeline results
//!
//! This module provides:
//! - `RunSummary`: per-run diagnostics serialized next to the matrix
//! - `OutputCollector`: builder for assembling the summary from stage results
//! - matrix writing for the final gene-by-sample alteration matrix

pub mod collector;
pub mod matrix;
pub mod schema;
pub mod types;

pub use collector::OutputCollector;
pub use matrix::{write_matrix, write_matrix_file};
pub use types::RunSummary;
