//! Error types for the rotation pipeline.
//!
//! One enum per layer:
//!
//! - [`InputError`] - command-line input path checks
//! - [`ConfigError`] - environment / option parsing
//! - [`CsvError`] - CSV decoding
//! - [`RowError`] - per-row JSON decoding (fatal for the whole run)
//! - [`MatrixError`] - shape violations caught by the rotator
//! - [`OutputError`] - CSV encoding of results
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Conversion is automatic via `From` implementations, so `?` works across
//! error boundaries. A row whose length has no square interpretation is
//! not an error: it is reported in the output as `is_valid = false`.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors about the input file argument itself.
#[derive(Debug, Error)]
pub enum InputError {
    /// No input path was given.
    #[error("Invalid/Missing File, please provide .csv file")]
    MissingPath,

    /// The path does not end in `.csv`.
    #[error("Invalid/Missing File, please provide .csv file (got '{}')", .0.display())]
    InvalidExtension(PathBuf),

    /// The path does not exist.
    #[error("Missing File, please provide input .csv file in directory ('{}')", .0.display())]
    NotFound(PathBuf),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building [`crate::config::RunOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable or flag holds an unusable value.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// CSV Decoding Errors
// =============================================================================

/// Errors while decoding the input CSV stream.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The CSV stream could not be decoded.
    #[error("CSV decode error at line {line}: {message}")]
    Decode { line: u64, message: String },

    /// The content could not be decoded from its detected encoding.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Failed to read the input.
    #[error("Failed to read CSV: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Decode {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Row Errors
// =============================================================================

/// Errors tied to a single input row. These abort the run.
#[derive(Debug, Error)]
pub enum RowError {
    /// The `json` column is not valid JSON.
    #[error("Malformed JSON in row '{id}' (line {line}): {source}")]
    MalformedJson {
        line: u64,
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Matrix Errors
// =============================================================================

/// Shape violations detected by the matrix code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The rotator was handed a matrix that is not N x N.
    #[error("Matrix is not square: {rows} rows, {columns} columns")]
    NotSquare { rows: usize, columns: usize },

    /// A row does not have the expected number of columns.
    #[error("Row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing the result CSV.
#[derive(Debug, Error)]
pub enum OutputError {
    /// CSV encoder failure.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Could not re-encode an element array.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write to the destination.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level error type returned by [`crate::transform::pipeline::run_file`].
///
/// Every variant is fatal: the run stops and no output is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Bad input path.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Bad configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// JSON decoding error in a row.
    #[error("Row error: {0}")]
    Row(#[from] RowError),

    /// Output encoding error.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input path checks.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for CSV decoding.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type for output encoding.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
