//! Filename classification for desktop organization.
//!
//! Maps a bare file name to one of a fixed set of destination folders using
//! keyword and extension tables compiled into the binary.
//!
//! # Examples
//!
//! ```
//! use deskgenie::classifier::{FolderCategory, classify};
//!
//! assert_eq!(classify("My_Resume.PDF"), FolderCategory::Work);
//! assert_eq!(classify("lab_report.docx"), FolderCategory::Study);
//! assert_eq!(classify("holiday.JPG"), FolderCategory::Media);
//! assert_eq!(classify("shopping.txt"), FolderCategory::Personal);
//! ```
use std::fmt;
use std::path::Path;

/// Substrings that mark a file as work-related.
pub const WORK_KEYWORDS: &[&str] = &["resume", "cv", "internship", "hackathon", "project"];

/// Substrings that mark a file as study material.
pub const STUDY_KEYWORDS: &[&str] = &["notes", "assignment", "lab", "syllabus"];

/// Extensions (dot included, lowercase) routed to the media folder.
pub const MEDIA_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".mp4", ".mov", ".mp3"];

/// A destination folder on the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FolderCategory {
    /// CVs, internship and project material
    Work,
    /// Notes, assignments, lab write-ups
    Study,
    /// Everything that matches no other rule
    Personal,
    /// Images, video and audio
    Media,
    /// Destination for detected duplicates only
    Archive,
}

impl FolderCategory {
    /// Returns the folder name for this category.
    ///
    /// The numeric prefix keeps the folders sorted in a fixed order in any
    /// file browser.
    ///
    /// ```
    /// use deskgenie::classifier::FolderCategory;
    ///
    /// assert_eq!(FolderCategory::Work.dir_name(), "01_Work");
    /// assert_eq!(FolderCategory::Archive.dir_name(), "05_Archive");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            FolderCategory::Work => "01_Work",
            FolderCategory::Study => "02_Study",
            FolderCategory::Personal => "03_Personal",
            FolderCategory::Media => "04_Media",
            FolderCategory::Archive => "05_Archive",
        }
    }
}

impl fmt::Display for FolderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Classifies a file name into a destination folder.
///
/// Rules are checked in order and the first match wins:
/// 1. name contains a work keyword
/// 2. name contains a study keyword
/// 3. extension is a media extension
/// 4. otherwise personal
///
/// Matching is case-insensitive. [`FolderCategory::Archive`] is never
/// returned; it is reserved for duplicates.
pub fn classify(file_name: &str) -> FolderCategory {
    let name = file_name.to_lowercase();

    if contains_any(&name, WORK_KEYWORDS) {
        return FolderCategory::Work;
    }

    if contains_any(&name, STUDY_KEYWORDS) {
        return FolderCategory::Study;
    }

    if let Some(ext) = dotted_extension(&name)
        && MEDIA_EXTENSIONS.contains(&ext.as_str())
    {
        return FolderCategory::Media;
    }

    FolderCategory::Personal
}

/// Returns the lowercased extension of `file_name` with its leading dot.
///
/// Names without an extension, and dotfiles such as `.bashrc`, yield `None`.
///
/// ```
/// use deskgenie::classifier::dotted_extension;
///
/// assert_eq!(dotted_extension("Photo.JPG").as_deref(), Some(".jpg"));
/// assert_eq!(dotted_extension("archive.tar.gz").as_deref(), Some(".gz"));
/// assert_eq!(dotted_extension("Makefile"), None);
/// assert_eq!(dotted_extension(".bashrc"), None);
/// ```
pub fn dotted_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
