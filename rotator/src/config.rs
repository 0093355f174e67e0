//! Run configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a `.env` file,
//! process environment, then command-line flags (applied by the binary).

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logs::LogFormat;

/// Input delimiter override.
pub const ENV_DELIMITER: &str = "ROTATE_DELIMITER";

/// Set to `1`/`true` to silence non-error logs.
pub const ENV_QUIET: &str = "ROTATE_QUIET";

/// `text` or `json`.
pub const ENV_LOG_FORMAT: &str = "ROTATE_LOG_FORMAT";

/// Options for a complete run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunOptions {
    /// Input delimiter (auto-detect if not specified)
    pub delimiter: Option<char>,

    /// Output file (stdout if not specified)
    pub output: Option<PathBuf>,

    /// Only log errors
    pub quiet: bool,

    /// Log rendering
    pub log_format: LogFormat,

    /// Reject inputs whose extension is not `.csv`
    pub require_csv_extension: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            output: None,
            quiet: false,
            log_format: LogFormat::Text,
            require_csv_extension: true,
        }
    }
}

impl RunOptions {
    /// Defaults overridden by `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try loading .env file
        let _ = dotenvy::dotenv();

        Self::default().with_vars(|key| env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DELIMITER) {
            self.delimiter = Some(parse_delimiter(&value).ok_or_else(|| invalid(ENV_DELIMITER, &value))?);
        }

        if let Some(value) = lookup(ENV_QUIET) {
            self.quiet = parse_bool(&value).ok_or_else(|| invalid(ENV_QUIET, &value))?;
        }

        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            self.log_format = value
                .parse()
                .map_err(|_| invalid(ENV_LOG_FORMAT, &value))?;
        }

        Ok(self)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Parse a delimiter given as a single character or as `tab` / `\t`
pub fn parse_delimiter(value: &str) -> Option<char> {
    match value {
        "\\t" | "tab" | "TAB" | "\t" => Some('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Some(c),
                _ => None,
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_options() {
        let opts = RunOptions::default();
        assert!(opts.delimiter.is_none());
        assert!(opts.output.is_none());
        assert!(!opts.quiet);
        assert!(opts.require_csv_extension);
    }

    #[test]
    fn test_env_overrides() {
        let opts = RunOptions::default()
            .with_vars(vars(&[
                (ENV_DELIMITER, ";"),
                (ENV_QUIET, "true"),
                (ENV_LOG_FORMAT, "json"),
            ]))
            .unwrap();

        assert_eq!(opts.delimiter, Some(';'));
        assert!(opts.quiet);
        assert_eq!(opts.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = RunOptions::default()
            .with_vars(vars(&[(ENV_QUIET, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_QUIET));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Some(','));
        assert_eq!(parse_delimiter("\\t"), Some('\t'));
        assert_eq!(parse_delimiter("tab"), Some('\t'));
        assert_eq!(parse_delimiter(",,"), None);
        assert_eq!(parse_delimiter(""), None);
        assert_eq!(parse_delimiter("\""), None);
    }
}
