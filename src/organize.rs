//! Sorting loose desktop files into category folders.
//!
//! Organizing is two-phase: [`preview`] decides where every eligible file
//! would go without touching anything, and only after the user confirms does
//! [`apply`] move them.

use crate::classifier::{FolderCategory, classify};
use crate::error::Result;
use crate::prompt::Confirm;
use crate::scan::{display_name, eligible_files};
use crate::session::Session;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One file and the folder it would be moved into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub source: PathBuf,
    pub file_name: String,
    pub category: FolderCategory,
}

/// How an organize run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeOutcome {
    NothingToOrganize,
    Cancelled { planned: usize },
    Completed { planned: usize, moved: usize },
}

/// Lists eligible files in the session directory and classifies each one.
///
/// Shortcuts, symlinks, subdirectories and anything the filters exclude
/// are left out. Nothing is moved.
pub fn preview(session: &mut Session) -> Result<Vec<PlannedMove>> {
    session.log_mut().info("Scanning Desktop...");

    let files = eligible_files(session.root(), session.filters())?;
    Ok(files
        .into_iter()
        .map(|source| {
            let file_name = display_name(&source);
            let category = classify(&file_name);
            PlannedMove {
                source,
                file_name,
                category,
            }
        })
        .collect())
}

/// Moves every planned file, in order, and returns how many were moved.
pub fn apply(session: &mut Session, plan: &[PlannedMove]) -> usize {
    let root = session.root().to_path_buf();
    plan.iter()
        .filter(|planned| session.safe_move(&planned.source, &root.join(planned.category.dir_name())))
        .count()
}

/// Previews, asks for confirmation with the file count, then applies.
pub fn organize(session: &mut Session, confirm: &mut dyn Confirm) -> Result<OrganizeOutcome> {
    let plan = preview(session)?;

    if plan.is_empty() {
        session.log_mut().info("No files to organize.");
        return Ok(OrganizeOutcome::NothingToOrganize);
    }

    let question = format!("{} files will be moved.\nProceed?", plan.len());
    if !confirm.confirm(&question)? {
        session.log_mut().warning("Operation cancelled.");
        return Ok(OrganizeOutcome::Cancelled {
            planned: plan.len(),
        });
    }

    let moved = apply(session, &plan);
    session
        .log_mut()
        .success(format!("Organization complete. {} files moved.", moved));

    Ok(OrganizeOutcome::Completed {
        planned: plan.len(),
        moved,
    })
}

/// Number of planned files per destination folder name.
pub fn folder_counts(plan: &[PlannedMove]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for planned in plan {
        *counts
            .entry(planned.category.dir_name().to_string())
            .or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity_log::{ActivityLog, LogLevel};
    use crate::config::CompiledFilters;
    use crate::prompt::ScriptedConfirm;
    use std::fs;
    use tempfile::TempDir;

    fn session(path: &std::path::Path) -> Session {
        Session::new(path, CompiledFilters::default(), ActivityLog::quiet()).unwrap()
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        for name in ["resume.pdf", "pic.jpg", "Game.lnk"] {
            fs::write(base_path.join(name), name).unwrap();
        }
        fs::create_dir(base_path.join("old stuff")).unwrap();

        let mut session = session(base_path);
        let plan = preview(&mut session).unwrap();

        let summary: Vec<_> = plan
            .iter()
            .map(|p| (p.file_name.as_str(), p.category))
            .collect();
        assert_eq!(
            summary,
            [
                ("pic.jpg", FolderCategory::Media),
                ("resume.pdf", FolderCategory::Work)
            ]
        );
        assert!(base_path.join("resume.pdf").exists());
        assert!(!base_path.join("01_Work").exists());
        assert!(session.undo_stack().is_empty());
    }

    #[test]
    fn test_organize_nothing_to_do_never_asks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut session = session(temp_dir.path());
        let mut confirm = ScriptedConfirm::always(true);

        let outcome = organize(&mut session, &mut confirm).unwrap();

        assert_eq!(outcome, OrganizeOutcome::NothingToOrganize);
        assert!(confirm.asked().is_empty());
        assert!(session.log().contains(LogLevel::Info, "No files to organize."));
    }

    #[test]
    fn test_organize_cancelled_is_noop() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("notes.txt"), "x").unwrap();
        let mut session = session(base_path);
        let mut confirm = ScriptedConfirm::always(false);

        let outcome = organize(&mut session, &mut confirm).unwrap();

        assert_eq!(outcome, OrganizeOutcome::Cancelled { planned: 1 });
        assert_eq!(confirm.asked(), ["1 files will be moved.\nProceed?"]);
        assert!(base_path.join("notes.txt").exists());
        assert!(session.log().contains(LogLevel::Warning, "Operation cancelled."));
    }

    #[test]
    fn test_organize_confirmed_moves_and_tallies() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        for name in ["assignment3.docx", "trip.mov", "budget.xlsx", "internship.pdf"] {
            fs::write(base_path.join(name), name).unwrap();
        }
        // Collision: same name already waiting in the destination
        fs::create_dir(base_path.join("03_Personal")).unwrap();
        fs::write(base_path.join("03_Personal").join("budget.xlsx"), "older").unwrap();

        let mut session = session(base_path);
        let outcome = organize(&mut session, &mut ScriptedConfirm::always(true)).unwrap();

        assert_eq!(
            outcome,
            OrganizeOutcome::Completed {
                planned: 4,
                moved: 3
            }
        );
        assert!(base_path.join("02_Study").join("assignment3.docx").exists());
        assert!(base_path.join("04_Media").join("trip.mov").exists());
        assert!(base_path.join("01_Work").join("internship.pdf").exists());
        assert!(base_path.join("budget.xlsx").exists());
        assert_eq!(session.undo_stack().len(), 3);
        assert!(session.log().contains(LogLevel::Success, "Organization complete. 3 files moved."));
    }

    #[test]
    fn test_hidden_files_are_organized() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join(".project_plan.txt"), "plan").unwrap();

        let mut session = session(base_path);
        let outcome = organize(&mut session, &mut ScriptedConfirm::always(true)).unwrap();

        assert_eq!(
            outcome,
            OrganizeOutcome::Completed {
                planned: 1,
                moved: 1
            }
        );
        assert!(base_path.join("01_Work").join(".project_plan.txt").exists());
        assert!(!base_path.join(".project_plan.txt").exists());
    }

    #[test]
    fn test_folder_counts() {
        let plan = vec![
            PlannedMove {
                source: PathBuf::from("a.jpg"),
                file_name: "a.jpg".into(),
                category: FolderCategory::Media,
            },
            PlannedMove {
                source: PathBuf::from("b.png"),
                file_name: "b.png".into(),
                category: FolderCategory::Media,
            },
            PlannedMove {
                source: PathBuf::from("cv.pdf"),
                file_name: "cv.pdf".into(),
                category: FolderCategory::Work,
            },
        ];

        let counts = folder_counts(&plan);
        assert_eq!(counts.get("04_Media"), Some(&2));
        assert_eq!(counts.get("01_Work"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
