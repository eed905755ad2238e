//! Undo support for reverting moves.
//!
//! Every successful move pushes a [`MoveRecord`] onto the [`UndoStack`].
//! Undoing drains the whole stack, most recent move first, so one undo
//! reverts everything moved since the stack was last emptied.
//!
//! The stack can be saved next to the organized files so that a later
//! process can still undo; see [`History`].
use crate::error::{DeskError, Result};
use crate::mover::{FileMover, MoveRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the saved history inside the organized directory.
pub const HISTORY_FILE_NAME: &str = ".deskgenie_history.json";

/// Ordered record of reversible moves, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    records: Vec<MoveRecord>,
}

/// Result of draining an [`UndoStack`].
#[derive(Debug, Default)]
pub struct UndoReport {
    /// Files moved back to their original location.
    pub restored: usize,
    /// Records dropped because the moved file no longer exists.
    pub discarded: Vec<PathBuf>,
    /// Records whose restore failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Reverts every recorded move, most recent first.
    ///
    /// Records whose file has vanished since the move are dropped without
    /// counting. A failed restore is reported but never stops the pass.
    /// The stack is always empty afterwards.
    pub fn undo_all(&mut self) -> UndoReport {
        let mut report = UndoReport::default();

        while let Some(record) = self.records.pop() {
            if fs::symlink_metadata(&record.current_path).is_err() {
                report.discarded.push(record.current_path);
                continue;
            }

            match FileMover::restore(&record) {
                Ok(()) => report.restored += 1,
                Err(e) => report.failed.push((record.current_path, e.to_string())),
            }
        }

        report
    }
}

impl From<Vec<MoveRecord>> for UndoStack {
    fn from(records: Vec<MoveRecord>) -> Self {
        Self { records }
    }
}

/// Undo state saved between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    /// RFC 3339 timestamp of the last save.
    pub saved_at: String,
    /// The directory the records belong to.
    pub base_path: PathBuf,
    /// Folder of the most recent successful move.
    #[serde(default)]
    pub last_destination: Option<PathBuf>,
    /// Pending moves, oldest first.
    #[serde(default)]
    pub records: Vec<MoveRecord>,
}

impl History {
    pub fn new(
        base_path: PathBuf,
        last_destination: Option<PathBuf>,
        records: Vec<MoveRecord>,
    ) -> Self {
        Self {
            saved_at: chrono::Utc::now().to_rfc3339(),
            base_path,
            last_destination,
            records,
        }
    }

    /// Returns the path of the history file for `base_path`.
    pub fn file_path(base_path: &Path) -> PathBuf {
        base_path.join(HISTORY_FILE_NAME)
    }

    /// Writes the history as pretty JSON into `base_path`.
    pub fn save(&self, base_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            DeskError::HistoryWrite(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            ))
        })?;

        fs::write(Self::file_path(base_path), json).map_err(DeskError::HistoryWrite)
    }

    /// Loads the saved history for `base_path`, if there is one.
    pub fn load(base_path: &Path) -> Result<Option<Self>> {
        let history_path = Self::file_path(base_path);
        if !history_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&history_path).map_err(DeskError::HistoryRead)?;
        let history = serde_json::from_str(&json)
            .map_err(|e| DeskError::InvalidHistory(format!("JSON parse error: {}", e)))?;

        Ok(Some(history))
    }

    /// Removes the history file for `base_path` if present.
    pub fn delete(base_path: &Path) -> Result<()> {
        let history_path = Self::file_path(base_path);
        if history_path.exists() {
            fs::remove_file(&history_path).map_err(DeskError::HistoryWrite)?;
        }
        Ok(())
    }
}
