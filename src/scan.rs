//! First-level directory listing shared by every scan.
//!
//! Entries are returned sorted by file name so that scans are deterministic
//! (which copy of a duplicate is "first", which move happens first). The
//! history file is never part of a listing.

use crate::config::CompiledFilters;
use crate::error::{DeskError, Result};
use crate::undo::HISTORY_FILE_NAME;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

/// Lists the immediate entries of `root`, sorted by name.
///
/// Entries that cannot be read mid-listing are dropped.
pub fn list_entries(root: &Path) -> Result<Vec<DirEntry>> {
    let read_dir = fs::read_dir(root).map_err(|e| DeskError::invalid_directory(root, e))?;

    let mut entries: Vec<DirEntry> = read_dir
        .flatten()
        .filter(|entry| entry.file_name() != HISTORY_FILE_NAME)
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    Ok(entries)
}

/// Regular files directly in `root` that the filters allow.
///
/// Symlinks and subdirectories are never included.
pub fn eligible_files(root: &Path, filters: &CompiledFilters) -> Result<Vec<PathBuf>> {
    Ok(list_entries(root)?
        .into_iter()
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .map(|entry| entry.path())
        .filter(|path| filters.should_include(path))
        .collect())
}

/// Directories directly in `root`. Symlinks to directories are not followed.
pub fn subdirectories(root: &Path) -> Result<Vec<PathBuf>> {
    Ok(list_entries(root)?
        .into_iter()
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
        .map(|entry| entry.path())
        .collect())
}

/// Returns the final component of `path` as a display string.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
