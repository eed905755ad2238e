//! Removing empty first-level folders.
//!
//! A folder counts as empty only if it has no entries at all; folders that
//! hold nothing but empty folders are left for a later run.

use crate::error::Result;
use crate::prompt::Confirm;
use crate::scan::{display_name, subdirectories};
use crate::session::Session;
use std::fs;
use std::path::{Path, PathBuf};

/// How an empty-folder cleanup ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    NoneFound,
    Cancelled { found: usize },
    Completed { deleted: usize, failed: Vec<PathBuf> },
}

/// Returns true if `dir` can be listed and has no entries.
pub fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_none())
}

/// Lists the empty subdirectories of `root`, sorted by name.
pub fn find_empty_folders(root: &Path) -> Result<Vec<PathBuf>> {
    Ok(subdirectories(root)?
        .into_iter()
        .filter(|dir| is_empty_dir(dir))
        .collect())
}

/// Finds empty folders, asks for confirmation, then removes them.
///
/// Each removal is attempted on its own: a folder that gained content since
/// the scan, or cannot be removed for any other reason, is logged and the
/// rest of the batch carries on.
pub fn delete_empty_folders(
    session: &mut Session,
    confirm: &mut dyn Confirm,
) -> Result<CleanupOutcome> {
    session.log_mut().info("Scanning for empty folders...");

    let empty = find_empty_folders(session.root())?;
    if empty.is_empty() {
        session.log_mut().info("No empty folders found.");
        return Ok(CleanupOutcome::NoneFound);
    }

    let question = format!("{} empty folders found.\nDelete them?", empty.len());
    if !confirm.confirm(&question)? {
        session.log_mut().warning("Operation cancelled.");
        return Ok(CleanupOutcome::Cancelled { found: empty.len() });
    }

    let mut deleted = 0;
    let mut failed = Vec::new();
    for folder in empty {
        match fs::remove_dir(&folder) {
            Ok(()) => {
                deleted += 1;
                session
                    .log_mut()
                    .info(format!("Deleted: {}", display_name(&folder)));
            }
            Err(e) => {
                session.log_mut().error(format!(
                    "Could not delete {}: {}",
                    display_name(&folder),
                    e
                ));
                failed.push(folder);
            }
        }
    }

    session
        .log_mut()
        .success(format!("Deleted {} empty folders.", deleted));

    Ok(CleanupOutcome::Completed { deleted, failed })
}
