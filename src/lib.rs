//! deskgenie - keep a desktop folder tidy
//!
//! This library classifies loose files by name, moves them into a fixed set
//! of folders without ever overwriting anything, archives duplicate files,
//! removes empty folders, reports simple statistics, and undoes every move
//! since the last undo in one step.

pub mod activity_log;
pub mod analytics;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod empty_folders;
pub mod error;
pub mod launcher;
pub mod mover;
pub mod organize;
pub mod output;
pub mod prompt;
pub mod scan;
pub mod session;
pub mod undo;

pub use activity_log::{ActivityLog, LogEntry, LogLevel};
pub use analytics::{DesktopStats, compute_stats};
pub use classifier::{FolderCategory, classify};
pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use error::{DeskError, Result};
pub use mover::MoveRecord;
pub use session::Session;
pub use undo::{UndoReport, UndoStack};

pub use cli::{Args, Command, run_cli};
