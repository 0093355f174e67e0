//! Transformation module.
//!
//! - Matrix: flat array to row-major matrix
//! - Rotator: one-step rotation of every concentric ring
//! - Row: compatibility rules for a single row
//! - Pipeline: file-level orchestration

pub mod matrix;
pub mod pipeline;
pub mod rotator;
pub mod row;

pub use matrix::{build, column_count_for, Matrix};
pub use pipeline::*;
pub use rotator::{rotate, rotate_in_place};
pub use row::{transform_elements, transform_row, transform_value};
