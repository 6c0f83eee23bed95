//! KSync Sync - folder to collection synchronization
//!
//! Provides:
//! - Local route folder scanning
//! - Filename cleaning before upload
//! - The per-account sync driver (clear, create, upload)
//! - The multi-account runner
//!
//! ## Modules
//!
//! - [`scanner`] - Read-only discovery of route files grouped by folder
//! - [`filenames`] - In-place renaming of route files with awkward names
//! - [`engine`] - Applies a reconciliation result to the remote store
//! - [`runner`] - Authenticate, list, scan, reconcile and sync per account

pub mod engine;
pub mod filenames;
pub mod runner;
pub mod scanner;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while working with the local route directory
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error occurred during file operations
    #[error("IO error on {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            SyncError::PathNotFound(path)
        } else {
            SyncError::IoError { path, source }
        }
    }
}
