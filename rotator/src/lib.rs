//! # Rotate - layer rotation of square matrices stored in CSV
//!
//! Each input row carries an `id` and a `json` array. Arrays whose length
//! is a perfect square are laid out as an N x N matrix, every concentric
//! ring is shifted one position clockwise, and the matrix is flattened
//! back. Rows that cannot form a square are flagged `is_valid = false`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│  CSV Output │
//! │  (id, json) │     │  (auto-enc) │     │  (rotation) │     │  (stdout)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rotate::transform_elements;
//!
//! let rotated = transform_elements(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
//! assert_eq!(rotated, Some(vec![4, 1, 2, 7, 5, 3, 8, 9, 6]));
//!
//! assert_eq!(transform_elements(vec![1, 2]), None);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Rows and results
//! - [`config`] - Run options
//! - [`logs`] - Stderr logging
//! - [`parser`] - CSV input decoding
//! - [`transform`] - Matrix building, rotation and the pipeline
//! - [`writer`] - CSV output encoding

// Core modules
pub mod error;
pub mod models;

// Ambient
pub mod config;
pub mod logs;

// Input
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod writer;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    CsvError,
    InputError,
    MatrixError,
    OutputError,
    PipelineError,
    RowError,
};

// =============================================================================
// Re-exports - Models & config
// =============================================================================

pub use config::RunOptions;
pub use models::{DecodedRow, InputRow, RowResult, RunSummary};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_row,
    detect_delimiter,
    detect_encoding,
    parse_bytes,
    parse_file,
    validate_input_path,
    ParseResult,
};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    build,
    process_rows,
    rotate,
    run_file,
    transform_elements,
    transform_row,
    transform_value,
    Matrix,
    RunReport,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use writer::{write_results, write_results_to};
