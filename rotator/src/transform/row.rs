//! Per-row transformation: compatibility check, build, rotate, flatten.

use serde_json::Value;

use super::matrix::{build, column_count_for};
use super::rotator::rotate;
use crate::models::{DecodedRow, RowResult};

/// Transform a flat element array.
///
/// Returns `None` when the array has no square interpretation:
///
/// - 1 element: returned as is
/// - `floor(sqrt(len)) <= 1` (0, 2 or 3 elements): incompatible
/// - otherwise the array must fill an N x N matrix exactly
pub fn transform_elements<T: Clone>(elements: Vec<T>) -> Option<Vec<T>> {
    if elements.len() == 1 {
        return Some(elements);
    }

    let column_count = column_count_for(elements.len());
    if column_count <= 1 {
        return None;
    }

    let matrix = build(&elements, column_count);
    // Catches lengths that are not perfect squares (short last row)
    if matrix.check_columns(column_count).is_err() {
        return None;
    }

    rotate(matrix).ok().map(|m| m.into_flat())
}

/// Transform any decoded JSON value. Only arrays can be compatible.
pub fn transform_value(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(elements) => transform_elements(elements),
        _ => None,
    }
}

/// Transform a decoded row into its output record
pub fn transform_row(row: DecodedRow) -> RowResult {
    match transform_value(row.elements) {
        Some(elements) => RowResult::valid(row.id, elements),
        None => RowResult::invalid(row.id),
    }
}
