//! Collision-safe file moves.
//!
//! [`FileMover`] performs the filesystem half of a safe move: it makes sure
//! the destination folder exists, refuses to overwrite anything already at the
//! destination, and otherwise renames the file into place. Recording the move
//! for undo and reporting it is done by [`crate::session::Session::safe_move`].
use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A completed move that can be reversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Where the file lives now.
    pub current_path: PathBuf,
    /// Where the file lived before the move.
    pub original_path: PathBuf,
}

impl MoveRecord {
    pub fn new(current_path: PathBuf, original_path: PathBuf) -> Self {
        Self {
            current_path,
            original_path,
        }
    }
}

/// What a move attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveAttempt {
    /// The file was moved.
    Moved(MoveRecord),
    /// Something already exists at the destination; nothing was touched.
    Skipped { destination: PathBuf },
}

pub struct FileMover;

impl FileMover {
    /// Moves `source` into `destination_folder`, keeping its file name.
    ///
    /// The folder (and any missing parents) is created first; an existing
    /// folder is fine. If the destination path is already taken the file is
    /// left where it is and [`MoveAttempt::Skipped`] is returned.
    ///
    /// # Errors
    ///
    /// * [`DeskError::DirectoryCreation`] if the folder cannot be created
    /// * [`DeskError::Move`] if the source has no file name or the rename fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use deskgenie::mover::{FileMover, MoveAttempt};
    /// use std::path::Path;
    ///
    /// match FileMover::move_into(Path::new("/home/me/Desktop/cv.pdf"), Path::new("/home/me/Desktop/01_Work")) {
    ///     Ok(MoveAttempt::Moved(record)) => println!("now at {}", record.current_path.display()),
    ///     Ok(MoveAttempt::Skipped { destination }) => println!("{} exists", destination.display()),
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    pub fn move_into(source: &Path, destination_folder: &Path) -> Result<MoveAttempt> {
        fs::create_dir_all(destination_folder).map_err(|e| DeskError::DirectoryCreation {
            path: destination_folder.to_path_buf(),
            source: e,
        })?;

        let file_name = source.file_name().ok_or_else(|| DeskError::Move {
            from: source.to_path_buf(),
            to: destination_folder.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "file has no name component"),
        })?;
        let destination = destination_folder.join(file_name);

        // symlink_metadata so a dangling link at the destination also counts as taken
        if fs::symlink_metadata(&destination).is_ok() {
            return Ok(MoveAttempt::Skipped { destination });
        }

        fs::rename(source, &destination).map_err(|e| DeskError::Move {
            from: source.to_path_buf(),
            to: destination.clone(),
            source: e,
        })?;

        Ok(MoveAttempt::Moved(MoveRecord::new(
            destination,
            source.to_path_buf(),
        )))
    }

    /// Moves a file back to where a record says it came from.
    ///
    /// Refuses to overwrite a file that has since appeared at the original
    /// location.
    pub fn restore(record: &MoveRecord) -> Result<()> {
        if fs::symlink_metadata(&record.original_path).is_ok() {
            return Err(DeskError::Move {
                from: record.current_path.clone(),
                to: record.original_path.clone(),
                source: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "original location is occupied",
                ),
            });
        }

        if let Some(parent) = record.original_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| DeskError::DirectoryCreation {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::rename(&record.current_path, &record.original_path).map_err(|e| DeskError::Move {
            from: record.current_path.clone(),
            to: record.original_path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_into_creates_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("notes.txt");
        fs::write(&file_path, "lecture 1").expect("Failed to write test file");

        let folder = base_path.join("02_Study");
        let attempt = FileMover::move_into(&file_path, &folder).expect("Failed to move file");

        let moved = folder.join("notes.txt");
        assert_eq!(
            attempt,
            MoveAttempt::Moved(MoveRecord::new(moved.clone(), file_path.clone()))
        );
        assert!(folder.is_dir());
        assert!(!file_path.exists());
        assert_eq!(fs::read_to_string(moved).unwrap(), "lecture 1");
    }

    #[test]
    fn test_move_into_existing_nested_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let folder = base_path.join("a").join("b");
        fs::create_dir_all(&folder).expect("Failed to create folder");
        let file_path = base_path.join("x.bin");
        fs::write(&file_path, [1u8, 2, 3]).expect("Failed to write test file");

        let attempt = FileMover::move_into(&file_path, &folder).expect("Failed to move file");
        assert!(matches!(attempt, MoveAttempt::Moved(_)));
        assert!(folder.join("x.bin").is_file());
    }

    #[test]
    fn test_move_into_skips_on_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let folder = base_path.join("03_Personal");
        fs::create_dir(&folder).expect("Failed to create folder");
        fs::write(folder.join("todo.txt"), "old").expect("Failed to write existing file");
        let file_path = base_path.join("todo.txt");
        fs::write(&file_path, "new").expect("Failed to write test file");

        let attempt = FileMover::move_into(&file_path, &folder).expect("Move should not error");

        assert_eq!(
            attempt,
            MoveAttempt::Skipped {
                destination: folder.join("todo.txt")
            }
        );
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new");
        assert_eq!(fs::read_to_string(folder.join("todo.txt")).unwrap(), "old");
    }

    #[test]
    fn test_move_into_missing_source_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let result = FileMover::move_into(&base_path.join("ghost.txt"), &base_path.join("dest"));
        assert!(matches!(result, Err(DeskError::Move { .. })));
    }

    #[test]
    fn test_restore_refuses_occupied_original() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("song.mp3");
        fs::write(&file_path, "la la").expect("Failed to write test file");
        let MoveAttempt::Moved(record) =
            FileMover::move_into(&file_path, &base_path.join("04_Media")).unwrap()
        else {
            panic!("expected a move");
        };

        fs::write(&file_path, "replacement").expect("Failed to write replacement");
        assert!(FileMover::restore(&record).is_err());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "replacement");
        assert!(record.current_path.exists());
    }
}
