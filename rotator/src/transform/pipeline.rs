//! High-level pipeline: input file → decoded rows → rotated results → CSV.
//!
//! # Example
//!
//! ```rust,ignore
//! use rotate::{run_file, RunOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run_file(Some(Path::new("matrices.csv")), &RunOptions::default())?;
//!     eprintln!("{} valid rows", report.summary.valid);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Serialize;

use super::row::transform_row;
use crate::config::RunOptions;
use crate::error::{PipelineResult, RowError};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{DecodedRow, InputRow, RowResult, RunSummary};
use crate::parser::{decode_row, parse_file, validate_input_path, ParseResult};
use crate::writer::write_results_to;

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
}

/// Result of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// One result per kept input row, in input order
    pub results: Vec<RowResult>,

    /// Counters
    pub summary: RunSummary,

    /// CSV parsing metadata
    pub csv_info: CsvInfo,
}

/// Decode the JSON of every row, stopping at the first malformed one
pub fn decode_rows(rows: Vec<InputRow>) -> Result<Vec<DecodedRow>, RowError> {
    rows.into_iter().map(decode_row).collect()
}

/// Transform rows in order.
///
/// All rows are decoded before any is transformed, so a malformed row
/// anywhere in the input produces no results at all.
pub fn process_rows(rows: Vec<InputRow>) -> PipelineResult<Vec<RowResult>> {
    let decoded = decode_rows(rows)?;
    Ok(decoded.into_iter().map(transform_row).collect())
}

/// Process an already parsed input and collect the report
pub fn process_parsed(parse_result: ParseResult) -> PipelineResult<RunReport> {
    let summary = RunSummary {
        rows_read: parse_result.rows_read,
        rows_skipped: parse_result.rows_skipped(),
        ..Default::default()
    };
    let csv_info = CsvInfo {
        encoding: parse_result.encoding,
        delimiter: parse_result.delimiter,
        headers: parse_result.headers,
    };

    let results = process_rows(parse_result.rows)?;
    let summary = summary.tally(&results);

    Ok(RunReport {
        results,
        summary,
        csv_info,
    })
}

/// Run the full pipeline on a file and write the result CSV.
///
/// The output goes to `options.output`, or stdout. Nothing is written if
/// any step fails.
pub fn run_file(path: Option<&Path>, options: &RunOptions) -> PipelineResult<RunReport> {
    let path = validate_input_path(path, options.require_csv_extension)?;

    log_info(format!("📄 Reading {}", path.display()));
    let parse_result = parse_file(path, options.delimiter)?;
    log_success(format!("Encoding: {}", parse_result.encoding));
    log_success(format!(
        "Delimiter: '{}'{}",
        format_delimiter(parse_result.delimiter),
        if options.delimiter.is_none() { " (auto-detected)" } else { "" }
    ));
    log_success(format!("Read {} rows", parse_result.rows_read));

    if !parse_result.headers.iter().any(|h| h == crate::parser::ID_COLUMN)
        || !parse_result.headers.iter().any(|h| h == crate::parser::JSON_COLUMN)
    {
        log_warning(format!(
            "Header has no 'id'/'json' pair: {}",
            parse_result.headers.join(", ")
        ));
    }

    log_info("⚙️  Rotating matrices...");
    let report = process_parsed(parse_result)?;
    print_summary(&report.summary);

    write_results_to(&report.results, options.output.as_deref())?;
    if let Some(ref output) = options.output {
        log_success(format!("💾 Output written to: {}", output.display()));
    }

    Ok(report)
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn print_summary(summary: &RunSummary) {
    if summary.rows_skipped > 0 {
        log_warning(format!(
            "{} rows skipped (missing id or json)",
            summary.rows_skipped
        ));
    }
    log_success(format!("Valid: {}", summary.valid));
    if summary.invalid > 0 {
        log_info_indent(format!("Invalid: {}", summary.invalid), 1);
    }
}
