//! Result CSV encoding.
//!
//! Columns are `id`, `json` (compact JSON array) and `is_valid`
//! (`true` / `false`). The header is always written.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::OutputResult;
use crate::models::RowResult;

/// Output header, in column order
pub const OUTPUT_HEADERS: [&str; 3] = ["id", "json", "is_valid"];

/// One serialized output line
#[derive(Debug, Serialize)]
struct OutputRecord<'a> {
    id: &'a str,
    json: String,
    is_valid: bool,
}

/// Write results as CSV to any writer
pub fn write_results<W: Write>(results: &[RowResult], writer: W) -> OutputResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_HEADERS)?;

    for result in results {
        csv_writer.serialize(OutputRecord {
            id: &result.id,
            json: serde_json::to_string(&result.json)?,
            is_valid: result.is_valid,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write results to a file, or to stdout when no path is given
pub fn write_results_to(results: &[RowResult], path: Option<&Path>) -> OutputResult<()> {
    match path {
        Some(p) => write_results(results, File::create(p)?),
        None => write_results(results, io::stdout().lock()),
    }
}

/// Render results to an in-memory CSV string
pub fn results_to_string(results: &[RowResult]) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_results(results, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
