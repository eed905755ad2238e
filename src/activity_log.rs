//! Session activity log.
//!
//! Every operation reports what it did as timestamped, leveled lines. The log
//! is append-only for the lifetime of a session, echoed to the terminal as it
//! grows, and can be exported verbatim to a text file.

use crate::error::Result;
use crate::output::OutputFormatter;
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the activity log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// Creates an entry stamped with the current local time.
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    /// Formats as `[HH:MM:SS] [LEVEL] message`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.timestamp.format("%H:%M:%S"),
            self.level,
            self.message
        )
    }
}

/// Append-only log of everything a session did.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
    quiet: bool,
}

impl ActivityLog {
    /// Creates a log that echoes each entry to the terminal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log that echoes only errors and records everything.
    pub fn quiet() -> Self {
        Self {
            entries: Vec::new(),
            quiet: true,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Returns true if entries at `level` are printed as they are logged.
    ///
    /// Errors are always printed; a quiet log drops everything else.
    pub fn should_echo(&self, level: LogLevel) -> bool {
        !self.quiet || level == LogLevel::Error
    }

    /// Appends an entry and echoes it if [`should_echo`](Self::should_echo)
    /// allows its level.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry::now(level, message);
        if self.should_echo(level) {
            OutputFormatter::entry(&entry);
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any entry at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.level == level && entry.message.contains(needle))
    }

    /// Writes every entry, one formatted line each, to `path`.
    ///
    /// The file is truncated first. On success a SUCCESS entry is appended
    /// to the log itself (after the export, so it is not part of the file).
    pub fn export(&mut self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for entry in &self.entries {
            writeln!(writer, "{}", entry)?;
        }
        writer.flush()?;

        self.success("Log exported successfully.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_entry_format() {
        let entry = LogEntry {
            timestamp: Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap(),
            level: LogLevel::Warning,
            message: "Skipped (already exists): a.txt".to_string(),
        };
        assert_eq!(
            entry.to_string(),
            "[09:05:07] [WARNING] Skipped (already exists): a.txt"
        );
    }

    #[test]
    fn test_log_is_append_only_and_ordered() {
        let mut log = ActivityLog::quiet();
        log.info("first");
        log.error("second");
        log.success("third");

        let messages: Vec<_> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
        assert!(log.contains(LogLevel::Error, "second"));
        assert!(!log.contains(LogLevel::Info, "second"));
    }

    #[test]
    fn test_quiet_log_still_echoes_errors() {
        let quiet = ActivityLog::quiet();
        assert!(quiet.should_echo(LogLevel::Error));
        assert!(!quiet.should_echo(LogLevel::Info));
        assert!(!quiet.should_echo(LogLevel::Success));
        assert!(!quiet.should_echo(LogLevel::Warning));

        let loud = ActivityLog::new();
        for level in [LogLevel::Info, LogLevel::Success, LogLevel::Warning, LogLevel::Error] {
            assert!(loud.should_echo(level));
        }
    }

    #[test]
    fn test_export_writes_one_line_per_entry() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let export_path = temp_dir.path().join("log.txt");

        let mut log = ActivityLog::quiet();
        log.info("Scanning Desktop...");
        log.success("Moved: cv.pdf");
        let expected: Vec<String> = log.entries().iter().map(|e| e.to_string()).collect();

        log.export(&export_path).expect("Export failed");

        let content = fs::read_to_string(&export_path).expect("Failed to read export");
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, expected);
        assert_eq!(log.len(), 3);
        assert!(log.contains(LogLevel::Success, "Log exported successfully."));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut log = ActivityLog::quiet();
        log.info("something");

        let result = log.export(&temp_dir.path().join("missing").join("log.txt"));
        assert!(result.is_err());
        assert_eq!(log.len(), 1);
    }
}
