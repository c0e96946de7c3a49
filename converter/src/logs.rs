//! Pipeline log output.
//!
//! Every stage reports progress through the `log_*` helpers. Entries go to
//! stderr so that stdout stays free for command output (the JSON dump of
//! `roster2sql parse`), either as indented text or as one JSON object per line.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

/// Severity of a pipeline message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    /// Fatal failure; shown even in quiet mode
    Error,
}

impl LogLevel {
    /// Text-mode marker printed before the message
    fn marker(self) -> &'static str {
        match self {
            Self::Info => "   ",
            Self::Success => "   ✓",
            Self::Warning => "   ⚠️",
            Self::Error => "   ❌",
        }
    }
}

/// One line of pipeline output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth under the previous step
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), indent: 0 }
    }

    pub fn nested(self, indent: u8) -> Self {
        Self { indent, ..self }
    }
}

/// How entries are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}' (expected text or json)", other)),
        }
    }
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Writes log entries to stderr
pub struct Logger {
    quiet: AtomicBool,
    json: AtomicBool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            quiet: AtomicBool::new(false),
            json: AtomicBool::new(false),
        }
    }

    /// Suppress all output (tests, scripted runs)
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

    /// Whether entries of `level` are written
    pub fn enabled(&self, level: LogLevel) -> bool {
        level == LogLevel::Error || !self.quiet.load(Ordering::Relaxed)
    }

    pub fn log(&self, entry: LogEntry) {
        if self.enabled(entry.level) {
            eprintln!("{}", render(&entry, self.format()));
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one entry in the given format
pub fn render(entry: &LogEntry, format: LogFormat) -> String {
    match format {
        LogFormat::Json => match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(_) => render(entry, LogFormat::Text),
        },
        LogFormat::Text => format!(
            "{}{} {}",
            "   ".repeat(usize::from(entry.indent)),
            entry.level.marker(),
            entry.message
        ),
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Info, msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Warning, msg));
}

/// Report a fatal error; written even when the logger is quiet.
pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Error, msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::new(LogLevel::Info, msg).nested(indent));
}
