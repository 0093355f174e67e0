//! Leveled run logs.
//!
//! Everything goes to stderr: stdout carries the result CSV and must stay
//! clean. Entries can be rendered as prefixed text lines or as one JSON
//! object per line, and can be captured in memory.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Log level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// How entries are rendered on stderr
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Render as a human readable line (no trailing newline)
    pub fn to_text(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Writes log entries to stderr, optionally keeping a copy in memory
pub struct Logger {
    quiet: AtomicBool,
    json: AtomicBool,
    captured: Mutex<Option<Vec<LogEntry>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            quiet: AtomicBool::new(false),
            json: AtomicBool::new(false),
            captured: Mutex::new(None),
        }
    }

    /// Only errors are emitted while quiet
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    pub fn set_format(&self, format: LogFormat) {
        self.json.store(format == LogFormat::Json, Ordering::Relaxed);
    }

    pub fn format(&self) -> LogFormat {
        if self.json.load(Ordering::Relaxed) {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    /// Start keeping every emitted entry in memory
    pub fn start_capture(&self) {
        if let Ok(mut captured) = self.captured.lock() {
            *captured = Some(Vec::new());
        }
    }

    /// Stop capturing and return what was collected
    pub fn take_captured(&self) -> Vec<LogEntry> {
        self.captured
            .lock()
            .ok()
            .and_then(|mut captured| captured.take())
            .unwrap_or_default()
    }

    /// Whether an entry passes the quiet filter
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level == LogLevel::Error || !self.quiet.load(Ordering::Relaxed)
    }

    /// Emit a log entry
    pub fn log(&self, entry: LogEntry) {
        if !self.is_enabled(entry.level) {
            return;
        }

        let line = match self.format() {
            LogFormat::Text => entry.to_text(),
            LogFormat::Json => serde_json::to_string(&entry).unwrap_or_else(|_| entry.to_text()),
        };
        // Ignore broken stderr
        let _ = writeln!(std::io::stderr().lock(), "{}", line);

        if let Ok(mut captured) = self.captured.lock() {
            if let Some(entries) = captured.as_mut() {
                entries.push(entry);
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::info(msg).with_indent(indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_keeps_errors() {
        let logger = Logger::new();
        logger.set_quiet(true);
        logger.start_capture();

        logger.log(LogEntry::info("hidden"));
        logger.log(LogEntry::warning("hidden too"));
        logger.log(LogEntry::error("shown"));

        let entries = logger.take_captured();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
    }

    #[test]
    fn test_capture_disabled_by_default() {
        let logger = Logger::new();
        logger.log(LogEntry::info("not kept"));
        assert!(logger.take_captured().is_empty());
    }

    #[test]
    fn test_text_rendering() {
        let entry = LogEntry::success("done").with_indent(1);
        assert_eq!(entry.to_text(), "      ✓ done");
    }

    #[test]
    fn test_json_entry_shape() {
        let value = serde_json::to_value(LogEntry::warning("careful")).unwrap();
        assert_eq!(value["level"], "warning");
        assert_eq!(value["message"], "careful");
        assert_eq!(value["indent"], 0);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
