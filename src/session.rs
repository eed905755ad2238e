//! Session state shared by every operation.
//!
//! A [`Session`] owns everything that outlives a single command: the undo
//! stack, the last destination folder and the activity log. It also provides
//! the safe move that scans build on.

use crate::activity_log::ActivityLog;
use crate::config::CompiledFilters;
use crate::error::{DeskError, Result};
use crate::mover::{FileMover, MoveAttempt};
use crate::scan::display_name;
use crate::undo::{History, UndoReport, UndoStack};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Session {
    root: PathBuf,
    filters: CompiledFilters,
    undo: UndoStack,
    last_destination: Option<PathBuf>,
    log: ActivityLog,
    persistent: bool,
}

impl Session {
    /// Starts an in-memory session for `root`: empty stack, no destination.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::InvalidDirectory`] if `root` is not a directory.
    pub fn new(root: impl Into<PathBuf>, filters: CompiledFilters, log: ActivityLog) -> Result<Self> {
        let root = root.into();
        let metadata =
            std::fs::metadata(&root).map_err(|e| DeskError::invalid_directory(&root, e))?;
        if !metadata.is_dir() {
            return Err(DeskError::invalid_directory(
                &root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }

        Ok(Self {
            root,
            filters,
            undo: UndoStack::new(),
            last_destination: None,
            log,
            persistent: false,
        })
    }

    /// Starts a session that resumes, and later saves, the history stored
    /// in `root`.
    pub fn open(root: impl Into<PathBuf>, filters: CompiledFilters, log: ActivityLog) -> Result<Self> {
        let mut session = Self::new(root, filters, log)?;
        session.persistent = true;

        if let Some(history) = History::load(&session.root)? {
            session.undo = UndoStack::from(history.records);
            session.last_destination = history.last_destination;
        }

        Ok(session)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filters(&self) -> &CompiledFilters {
        &self.filters
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub fn last_destination(&self) -> Option<&Path> {
        self.last_destination.as_deref()
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ActivityLog {
        &mut self.log
    }

    /// Moves `source` into `destination_folder` without ever overwriting.
    ///
    /// Returns true only if the file was moved; in that case the move is
    /// pushed onto the undo stack and the folder becomes the last
    /// destination. A name collision is logged as a warning and any I/O
    /// failure as an error; neither is returned to the caller.
    pub fn safe_move(&mut self, source: &Path, destination_folder: &Path) -> bool {
        let file_name = display_name(source);

        match FileMover::move_into(source, destination_folder) {
            Ok(MoveAttempt::Moved(record)) => {
                self.log.success(format!("Moved: {}", file_name));
                self.log.info(format!("From: {}", record.original_path.display()));
                self.log.info(format!("To:   {}", record.current_path.display()));
                self.undo.push(record);
                self.last_destination = Some(destination_folder.to_path_buf());
                true
            }
            Ok(MoveAttempt::Skipped { .. }) => {
                self.log
                    .warning(format!("Skipped (already exists): {}", file_name));
                false
            }
            Err(e) => {
                self.log.error(format!("Error moving file: {}", e));
                false
            }
        }
    }

    /// Reverts every move since the stack was last drained.
    ///
    /// Returns the number of files restored. The stack is empty afterwards.
    pub fn undo_all(&mut self) -> usize {
        if self.undo.is_empty() {
            self.log.info("Nothing to undo.");
            return 0;
        }

        let report: UndoReport = self.undo.undo_all();

        for (path, reason) in &report.failed {
            self.log
                .error(format!("Could not restore {}: {}", path.display(), reason));
        }
        if !report.discarded.is_empty() {
            self.log.warning(format!(
                "{} moved files no longer exist and were dropped.",
                report.discarded.len()
            ));
        }
        self.log
            .success(format!("Undo complete. {} files restored.", report.restored));

        report.restored
    }

    /// Opens the last destination folder with `open`.
    ///
    /// Returns false, after logging, when there is no destination or it has
    /// been removed since.
    pub fn open_last_destination<F>(&mut self, open: F) -> bool
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let Some(folder) = self.last_destination.clone().filter(|dir| dir.is_dir()) else {
            self.log.info("No destination folder available.");
            return false;
        };

        match open(&folder) {
            Ok(()) => {
                self.log.info(format!("Opened {}", folder.display()));
                true
            }
            Err(e) => {
                self.log.error(e.to_string());
                false
            }
        }
    }

    /// Saves undo state for the next run, or removes it once nothing is
    /// left to undo. No-op for in-memory sessions.
    pub fn persist(&self) -> Result<()> {
        if !self.persistent {
            return Ok(());
        }

        if self.undo.is_empty() && self.last_destination.is_none() {
            return History::delete(&self.root);
        }

        History::new(
            self.root.clone(),
            self.last_destination.clone(),
            self.undo.records().to_vec(),
        )
        .save(&self.root)
    }
}
