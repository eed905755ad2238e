//! Error types shared across the crate.

use crate::config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole command.
///
/// Per-file failures inside a batch never show up here: they are logged and
/// tallied by the scan drivers instead.
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid directory {}: {source}", path.display())]
    InvalidDirectory { path: PathBuf, source: io::Error },

    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("Failed to read history file: {0}")]
    HistoryRead(io::Error),

    #[error("Failed to write history file: {0}")]
    HistoryWrite(io::Error),

    #[error("Invalid history file format: {0}")]
    InvalidHistory(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Failed to open {}: {reason}", path.display())]
    Launch { path: PathBuf, reason: String },

    #[error("Could not determine the desktop directory")]
    NoDesktop,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DeskError>;

impl DeskError {
    /// Wraps an IO error for a target directory that cannot be listed.
    pub fn invalid_directory(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DeskError::InvalidDirectory {
            path: path.into(),
            source,
        }
    }
}
