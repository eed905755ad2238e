//! Read-only desktop statistics.

use crate::classifier::dotted_extension;
use crate::error::Result;
use crate::scan::list_entries;
use crate::session::Session;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Label used for files without an extension.
pub const NO_EXTENSION_LABEL: &str = "[No Extension]";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Counts gathered from one pass over a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopStats {
    pub file_count: usize,
    pub folder_count: usize,
    pub total_size_bytes: u64,
    /// Files per lowercased dotted extension; `None` is "no extension".
    pub extension_histogram: BTreeMap<Option<String>, usize>,
}

impl DesktopStats {
    /// Total size in megabytes, rounded to two decimals.
    pub fn total_size_mb(&self) -> f64 {
        (self.total_size_bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
    }

    /// Histogram rows as `(label, count)`, most common first, then by label.
    pub fn histogram_rows(&self) -> Vec<(String, usize)> {
        let mut rows: Vec<(String, usize)> = self
            .extension_histogram
            .iter()
            .map(|(ext, count)| {
                let label = ext.clone().unwrap_or_else(|| NO_EXTENSION_LABEL.to_string());
                (label, *count)
            })
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }
}

/// Counts files, folders, bytes and extensions directly inside `root`.
///
/// Symlinks are followed like regular entries; entries whose metadata cannot
/// be read are ignored.
pub fn compute_stats(root: &Path) -> Result<DesktopStats> {
    let mut stats = DesktopStats::default();

    for entry in list_entries(root)? {
        let Ok(metadata) = fs::metadata(entry.path()) else {
            continue;
        };

        if metadata.is_file() {
            stats.file_count += 1;
            stats.total_size_bytes += metadata.len();
            let name = entry.file_name();
            *stats
                .extension_histogram
                .entry(dotted_extension(&name.to_string_lossy()))
                .or_insert(0) += 1;
        } else if metadata.is_dir() {
            stats.folder_count += 1;
        }
    }

    Ok(stats)
}

/// Computes stats for the session directory and writes them to the log.
pub fn report_stats(session: &mut Session) -> Result<DesktopStats> {
    session.log_mut().info("Generating desktop analytics...");

    let stats = compute_stats(session.root())?;
    let log = session.log_mut();
    log.info(format!("Files: {}", stats.file_count));
    log.info(format!("Folders: {}", stats.folder_count));
    log.info(format!("Total Size: {:.2} MB", stats.total_size_mb()));
    log.info("File Type Distribution:");
    for (label, count) in stats.histogram_rows() {
        log.info(format!("{} : {}", label, count));
    }
    log.success("Analytics complete.");

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity_log::{ActivityLog, LogLevel};
    use crate::config::CompiledFilters;
    use tempfile::TempDir;

    #[test]
    fn test_counts_and_sizes() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("a.txt"), vec![0u8; 100]).unwrap();
        fs::write(base_path.join("b.TXT"), vec![0u8; 200]).unwrap();
        fs::write(base_path.join("Makefile"), vec![0u8; 300]).unwrap();
        fs::create_dir(base_path.join("sub")).unwrap();
        fs::write(base_path.join("sub").join("nested.txt"), vec![0u8; 999]).unwrap();

        let stats = compute_stats(base_path).unwrap();

        assert_eq!(stats.file_count, 3);
        assert_eq!(stats.folder_count, 1);
        assert_eq!(stats.total_size_bytes, 600);
        assert_eq!(stats.extension_histogram.get(&Some(".txt".to_string())), Some(&2));
        assert_eq!(stats.extension_histogram.get(&None), Some(&1));
    }

    #[test]
    fn test_histogram_rows_order_and_label() {
        let mut stats = DesktopStats::default();
        stats.extension_histogram.insert(Some(".png".into()), 1);
        stats.extension_histogram.insert(Some(".jpg".into()), 3);
        stats.extension_histogram.insert(None, 1);

        assert_eq!(
            stats.histogram_rows(),
            vec![
                (".jpg".to_string(), 3),
                (".png".to_string(), 1),
                ("[No Extension]".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_size_in_mb_rounding() {
        let stats = DesktopStats {
            total_size_bytes: 1_572_864, // 1.5 MiB
            ..Default::default()
        };
        assert_eq!(stats.total_size_mb(), 1.5);

        let stats = DesktopStats {
            total_size_bytes: 1_234_567,
            ..Default::default()
        };
        assert_eq!(stats.total_size_mb(), 1.18);
    }

    #[test]
    fn test_report_stats_is_read_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("song.mp3"), "x").unwrap();

        let mut session =
            Session::new(base_path, CompiledFilters::default(), ActivityLog::quiet()).unwrap();
        let stats = report_stats(&mut session).unwrap();

        assert_eq!(stats.file_count, 1);
        assert!(base_path.join("song.mp3").exists());
        assert!(session.log().contains(LogLevel::Info, ".mp3 : 1"));
        assert!(session.log().contains(LogLevel::Success, "Analytics complete."));
    }
}
