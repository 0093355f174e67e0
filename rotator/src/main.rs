//! Rotate CLI - one-step layer rotation of matrices stored in CSV
//!
//! # Main Command
//!
//! ```bash
//! rotate run input.csv                # Rotated CSV on stdout
//! rotate run input.csv -o out.csv     # ... or into a file
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! rotate parse input.csv              # Show the rows that will be processed
//! rotate row '[1,2,3,4]'              # Transform a single JSON array
//! ```

use clap::{Parser, Subcommand};
use rotate::config::parse_delimiter;
use rotate::logs::{log_error, log_info, LogFormat, LOGGER};
use rotate::{parse_file, run_file, transform_value, validate_input_path, RunOptions};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rotate")]
#[command(about = "Rotate every layer of square matrices stored as JSON arrays in a CSV file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rotate every row of a CSV file and write the result as CSV
    Run {
        /// Input CSV file with `id` and `json` columns
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long, value_parser = delimiter_arg)]
        delimiter: Option<char>,

        /// Only log errors
        #[arg(short, long)]
        quiet: bool,

        /// Log format on stderr: text or json
        #[arg(long)]
        log_format: Option<LogFormat>,

        /// Accept inputs without a .csv extension
        #[arg(long)]
        any_extension: bool,
    },

    /// Parse a CSV file and print the rows that would be rotated
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long, value_parser = delimiter_arg)]
        delimiter: Option<char>,
    },

    /// Transform a single JSON array
    Row {
        /// JSON text, e.g. '[1,2,3,4]'
        json: String,
    },
}

fn delimiter_arg(value: &str) -> Result<char, String> {
    parse_delimiter(value).ok_or_else(|| format!("'{}' is not a single-byte delimiter", value))
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            delimiter,
            quiet,
            log_format,
            any_extension,
        } => RunOptions::from_env()
            .map_err(Into::into)
            .and_then(|mut options| {
                if output.is_some() {
                    options.output = output;
                }
                if delimiter.is_some() {
                    options.delimiter = delimiter;
                }
                if let Some(format) = log_format {
                    options.log_format = format;
                }
                options.quiet |= quiet;
                options.require_csv_extension &= !any_extension;
                cmd_run(input.as_deref(), &options)
            }),

        Commands::Parse { input, delimiter } => cmd_parse(&input, delimiter),

        Commands::Row { json } => cmd_row(&json),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_run(input: Option<&Path>, options: &RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    LOGGER.set_quiet(options.quiet);
    LOGGER.set_format(options.log_format);

    run_file(input, options)?;
    log_info("✨ Done!");
    Ok(())
}

fn cmd_parse(input: &Path, delimiter: Option<char>) -> Result<(), Box<dyn std::error::Error>> {
    let input = validate_input_path(Some(input), true)?;
    log_info(format!("📄 Parsing CSV: {}", input.display()));

    let result = parse_file(input, delimiter)?;
    log_info(format!("Encoding: {}", result.encoding));
    log_info(format!("Columns: {}", result.headers.join(", ")));
    log_info(format!(
        "{} rows kept, {} skipped",
        result.rows.len(),
        result.rows_skipped()
    ));

    println!("{}", serde_json::to_string_pretty(&result.rows)?);
    Ok(())
}

fn cmd_row(json: &str) -> Result<(), Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_str(json)?;

    let output = match transform_value(value) {
        Some(elements) => json!({ "json": elements, "is_valid": true }),
        None => json!({ "json": [], "is_valid": false }),
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
