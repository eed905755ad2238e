//! Content-hash duplicate detection.
//!
//! Files are hashed with BLAKE3. The first file seen with a given digest
//! stays put; every later file with the same digest is moved into the
//! archive folder through the session's safe move, so it can be undone.

use crate::classifier::FolderCategory;
use crate::error::{DeskError, Result};
use crate::output::OutputFormatter;
use crate::scan::{display_name, eligible_files};
use crate::session::Session;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Tally of a duplicate scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    /// Files whose content matched an earlier file.
    pub found: usize,
    /// Duplicates actually moved into the archive.
    pub moved: usize,
    /// Files that could not be read and were ignored.
    pub unreadable: usize,
}

/// Returns the BLAKE3 digest of the file at `path`.
pub fn hash_file(path: &Path) -> io::Result<blake3::Hash> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize())
}

/// Moves every duplicate in the session directory into the archive folder.
///
/// Files are visited in name order, so the alphabetically first copy is the
/// one that stays. A duplicate that cannot be moved because the archive
/// already holds a file of that name still counts as found.
pub fn detect_duplicates(session: &mut Session) -> Result<DuplicateReport> {
    session.log_mut().info("Scanning for duplicates...");

    let archive = session.root().join(FolderCategory::Archive.dir_name());
    fs::create_dir_all(&archive).map_err(|e| DeskError::DirectoryCreation {
        path: archive.clone(),
        source: e,
    })?;

    let files = eligible_files(session.root(), session.filters())?;
    let mut report = DuplicateReport::default();
    let duplicates = find_duplicates(&files, !session.log().is_quiet(), &mut report);

    for (duplicate, original) in duplicates {
        report.found += 1;
        session.log_mut().info(format!(
            "Duplicate of {}: {}",
            original,
            display_name(&duplicate)
        ));
        if session.safe_move(&duplicate, &archive) {
            report.moved += 1;
        }
    }

    session.log_mut().success(format!(
        "Duplicate scan complete. {} duplicates moved.",
        report.moved
    ));
    if report.found > report.moved {
        session.log_mut().warning(format!(
            "{} duplicates could not be archived.",
            report.found - report.moved
        ));
    }

    Ok(report)
}

/// Hashes `files` in order and returns each later copy paired with the name
/// of the first file that had the same content.
fn find_duplicates(
    files: &[PathBuf],
    show_progress: bool,
    report: &mut DuplicateReport,
) -> Vec<(PathBuf, String)> {
    let pb = OutputFormatter::create_progress_bar(files.len() as u64, show_progress);
    pb.set_message("hashing");

    let mut first_seen: HashMap<blake3::Hash, String> = HashMap::new();
    let mut duplicates = Vec::new();

    for path in files {
        pb.inc(1);
        let Ok(digest) = hash_file(path) else {
            report.unreadable += 1;
            continue;
        };

        match first_seen.get(&digest) {
            Some(original) => duplicates.push((path.clone(), original.clone())),
            None => {
                first_seen.insert(digest, display_name(path));
            }
        }
    }

    pb.finish_and_clear();
    duplicates
}
