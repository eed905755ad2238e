//! Terminal output formatting and styling.
//!
//! Everything the tool prints goes through [`OutputFormatter`], so colors,
//! symbols and table layout stay consistent between the one-shot commands and
//! the interactive shell.

use crate::activity_log::{LogEntry, LogLevel};
use crate::analytics::DesktopStats;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;

/// Renders log entries, progress bars and tables.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a log entry, colored by level.
    ///
    /// Errors go to stderr; everything else goes to stdout.
    ///
    /// ```no_run
    /// use deskgenie::activity_log::{LogEntry, LogLevel};
    /// use deskgenie::output::OutputFormatter;
    ///
    /// OutputFormatter::entry(&LogEntry::now(LogLevel::Success, "Moved: cv.pdf"));
    /// ```
    pub fn entry(entry: &LogEntry) {
        let line = entry.to_string();
        match entry.level {
            LogLevel::Info => println!("{}", line.cyan()),
            LogLevel::Success => println!("{} {}", "✓".green(), line.green()),
            LogLevel::Warning => println!("{} {}", "⚠".yellow(), line.yellow()),
            LogLevel::Error => eprintln!("{} {}", "✗".red(), line.red()),
        }
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for `total` items.
    ///
    /// Returns a hidden bar when `visible` is false so callers can drive it
    /// unconditionally.
    pub fn create_progress_bar(total: u64, visible: bool) -> ProgressBar {
        if !visible {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints a table of file counts per destination folder.
    ///
    /// ```no_run
    /// use deskgenie::output::OutputFormatter;
    /// use std::collections::BTreeMap;
    ///
    /// let mut counts = BTreeMap::new();
    /// counts.insert("01_Work".to_string(), 3);
    /// counts.insert("04_Media".to_string(), 8);
    /// OutputFormatter::summary_table(&counts, 11);
    /// ```
    pub fn summary_table(folder_counts: &BTreeMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let width = folder_counts
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max("Folder".len());

        println!(
            "{:<width$} | {}",
            "Folder".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (folder, count) in folder_counts {
            println!(
                "{:<width$} | {} {}",
                folder,
                count.to_string().green(),
                plural(*count, "file", "files"),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            plural(total_files, "file", "files"),
            width = width
        );
    }

    /// Prints the extension histogram of a stats pass, most common first.
    pub fn extension_table(stats: &DesktopStats) {
        Self::header("FILE TYPES");

        let rows = stats.histogram_rows();
        let width = rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            .max("Extension".len());

        println!(
            "{:<width$} | {}",
            "Extension".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));
        for (label, count) in rows {
            println!(
                "{:<width$} | {}",
                label,
                count.to_string().green(),
                width = width
            );
        }
    }
}

/// Picks the singular or plural word for `count`.
pub fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
