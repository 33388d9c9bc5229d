//! Centralized logger for engine events
//!
//! Buffered, verbosity-filtered logging with text or JSON line output. The
//! JSON format is the structured channel an observability collaborator reads
//! invariant diagnostics from.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Verbosity level for engine output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - terminal outcomes only
    Minimal = 1,
    /// Normal - round results and key transitions (default)
    #[default]
    Normal = 2,
    /// Verbose - every state transition
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to the in-memory buffer
    Memory,
    /// Both stdout and the in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Entry category (e.g., "round", "war", "nuke", "audit")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Buffered, verbosity-filtered logger
///
/// The buffer sits behind a `RefCell` so the engine can log through a shared
/// reference while a move is being resolved.
#[derive(Debug, Default)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        GameLogger::default()
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..GameLogger::default()
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Get a copy of the captured entries
    pub fn logs(&self) -> Vec<LogEntry> {
        self.log_buffer.borrow().clone()
    }

    pub fn clear_logs(&self) {
        self.log_buffer.borrow_mut().clear();
    }

    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, None, message);
    }

    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, None, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, None, message);
    }

    /// Log a categorized event (the category survives into JSON output)
    pub fn event(&self, category: &str, level: VerbosityLevel, message: &str) {
        self.log(level, Some(category.to_string()), message);
    }

    fn log(&self, level: VerbosityLevel, category: Option<String>, message: &str) {
        if level > self.verbosity {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category,
        };

        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            self.print(&entry);
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    fn print(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text => println!("{}", entry.message),
            OutputFormat::Json => {
                if let Ok(line) = serde_json::to_string(entry) {
                    println!("{}", line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capturing(verbosity: VerbosityLevel) -> GameLogger {
        let mut logger = GameLogger::with_verbosity(verbosity);
        logger.set_output_mode(OutputMode::Memory);
        logger
    }

    #[test]
    fn test_verbosity_filtering() {
        let logger = capturing(VerbosityLevel::Normal);
        logger.minimal("game over");
        logger.normal("round result");
        logger.verbose("every little thing");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "game over");
        assert_eq!(logs[1].message, "round result");
    }

    #[test]
    fn test_silent_captures_nothing() {
        let logger = capturing(VerbosityLevel::Silent);
        logger.minimal("game over");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_event_category() {
        let logger = capturing(VerbosityLevel::Normal);
        logger.event("audit", VerbosityLevel::Minimal, "{\"counted\":53}");

        let logs = logger.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].category.as_deref(), Some("audit"));

        // The JSON line format round-trips the category
        let line = serde_json::to_string(&logs[0]).unwrap();
        let back: LogEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.category.as_deref(), Some("audit"));
    }

    #[test]
    fn test_clear_logs() {
        let logger = capturing(VerbosityLevel::Normal);
        logger.normal("one");
        logger.clear_logs();
        assert!(logger.logs().is_empty());
    }
}
