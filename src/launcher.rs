//! Opening folders in the platform file browser.

use crate::error::{DeskError, Result};
use std::path::Path;
use std::process::Command;

/// Opens `path` in Explorer, Finder or the desktop's default file manager.
pub fn open_in_file_browser(path: &Path) -> Result<()> {
    let program = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    let status = Command::new(program)
        .arg(path)
        .status()
        .map_err(|e| DeskError::Launch {
            path: path.to_path_buf(),
            reason: format!("failed to launch {}: {}", program, e),
        })?;

    // Explorer exits with 1 even when the window opened
    if status.success() || (cfg!(target_os = "windows") && status.code() == Some(1)) {
        Ok(())
    } else {
        Err(DeskError::Launch {
            path: path.to_path_buf(),
            reason: format!("{} returned {}", program, status),
        })
    }
}
