//! Domain models for the rotation pipeline.
//!
//! - [`InputRow`] - One CSV record that carries both an `id` and a `json` field
//! - [`DecodedRow`] - An [`InputRow`] whose `json` text has been parsed
//! - [`RowResult`] - Transformed output for one row
//! - [`RunSummary`] - Counters for a complete run

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Input
// =============================================================================

/// A CSV record that survived row filtering.
///
/// `id` is kept verbatim and never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputRow {
    /// Line of the record in the source file (1-based, header is line 1).
    pub line: u64,
    /// Opaque row identifier.
    pub id: String,
    /// Raw JSON text of the element array.
    pub json: String,
}

impl InputRow {
    pub fn new(line: u64, id: impl Into<String>, json: impl Into<String>) -> Self {
        Self {
            line,
            id: id.into(),
            json: json.into(),
        }
    }
}

/// A row whose JSON payload has been decoded.
///
/// The payload is normally an array, but any JSON value is accepted here;
/// non-arrays are rejected later as incompatible rather than as fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRow {
    pub line: u64,
    pub id: String,
    pub elements: Value,
}

// =============================================================================
// Output
// =============================================================================

/// Result of transforming one row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowResult {
    /// Identifier copied from the input row.
    pub id: String,
    /// Flattened elements (empty when the row is not compatible).
    pub json: Vec<Value>,
    /// Whether the row had a square interpretation.
    pub is_valid: bool,
}

impl RowResult {
    pub fn valid(id: impl Into<String>, json: Vec<Value>) -> Self {
        Self {
            id: id.into(),
            json,
            is_valid: true,
        }
    }

    pub fn invalid(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            json: Vec::new(),
            is_valid: false,
        }
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Data records read from the CSV (header excluded).
    pub rows_read: usize,
    /// Records dropped because `id` or `json` was missing.
    pub rows_skipped: usize,
    /// Rows written with `is_valid = true`.
    pub valid: usize,
    /// Rows written with `is_valid = false`.
    pub invalid: usize,
}

impl RunSummary {
    /// Count valid and invalid results on top of the parse counters.
    pub fn tally(mut self, results: &[RowResult]) -> Self {
        self.valid = results.iter().filter(|r| r.is_valid).count();
        self.invalid = results.len() - self.valid;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_result_is_empty() {
        let result = RowResult::invalid("7");
        assert!(!result.is_valid);
        assert!(result.json.is_empty());
        assert_eq!(result.id, "7");
    }

    #[test]
    fn test_tally() {
        let results = vec![
            RowResult::valid("1", vec![json!(1)]),
            RowResult::invalid("2"),
            RowResult::valid("3", vec![json!(3), json!(1), json!(4), json!(2)]),
        ];
        let summary = RunSummary {
            rows_read: 4,
            rows_skipped: 1,
            ..Default::default()
        }
        .tally(&results);

        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.rows_read, 4);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let value = serde_json::to_value(RunSummary::default()).unwrap();
        assert!(value.get("rowsSkipped").is_some());
    }
}
