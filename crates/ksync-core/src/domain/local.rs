//! Local folder groups discovered by the scanner

use std::path::{Path, PathBuf};

/// Route files found directly inside one local folder
///
/// Recomputed on every run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalGroup {
    /// Absolute path of the folder
    pub folder: PathBuf,
    /// Absolute paths of the route files inside `folder`, in name order
    pub files: Vec<PathBuf>,
}

impl LocalGroup {
    pub fn new(folder: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            files,
        }
    }

    /// Base name of the folder, used as the destination collection name
    ///
    /// Falls back to the full path for folders without a final component
    /// (e.g. `/`).
    pub fn folder_name(&self) -> String {
        folder_name(&self.folder)
    }
}

/// Base name of a folder path, lossily converted to UTF-8.
pub fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.to_string_lossy().into_owned())
}
