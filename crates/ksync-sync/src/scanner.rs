//! Local route folder scanner
//!
//! Discovers route files under the configured directory and groups them by
//! the folder that directly contains them. The scanner never modifies the
//! filesystem.
//!
//! ## Depth
//!
//! - The base directory's own files are always inspected; the reconciler
//!   later drops that group.
//! - Non-recursive scans also inspect the immediate subfolders of the base
//!   directory and nothing deeper.
//! - Recursive scans descend without a depth limit. Symlinked directories
//!   are not followed.
//!
//! Output is sorted by folder path, and each group's files by path, so two
//! scans of the same tree produce identical results.

use std::path::{Path, PathBuf};

use ksync_core::domain::LocalGroup;
use tracing::{debug, warn};

use crate::SyncError;

/// Entries of one directory relevant to a scan
#[derive(Debug, Default)]
struct DirListing {
    files: Vec<PathBuf>,
    subfolders: Vec<PathBuf>,
}

/// Returns true if `path` names a file ending in `.{extension}`
///
/// The comparison is case-sensitive.
pub fn has_route_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| {
            name.len() > extension.len() + 1
                && name.ends_with(extension)
                && name[..name.len() - extension.len()].ends_with('.')
        })
        .unwrap_or(false)
}

async fn read_listing(dir: &Path, extension: &str) -> Result<DirListing, SyncError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| SyncError::io(dir, e))?;
    let mut listing = DirListing::default();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| SyncError::io(dir, e))?
    {
        let path = entry.path();
        let file_type = match entry.file_type().await {
            Ok(t) => t,
            Err(err) => {
                warn!(path = %path.display(), %err, "Skipping unreadable entry");
                continue;
            }
        };

        if file_type.is_dir() {
            listing.subfolders.push(path);
        } else if has_route_extension(&path, extension) {
            let is_file = if file_type.is_symlink() {
                tokio::fs::metadata(&path)
                    .await
                    .map(|m| m.is_file())
                    .unwrap_or(false)
            } else {
                file_type.is_file()
            };
            if is_file {
                listing.files.push(path);
            }
        }
    }

    listing.files.sort();
    listing.subfolders.sort();
    Ok(listing)
}

/// Scans `base_dir` for route files and groups them by containing folder
///
/// Folders without a matching file are omitted.
///
/// # Errors
/// Returns an error if `base_dir` is missing, not a directory, or cannot be
/// read. Unreadable subfolders are logged and skipped.
#[tracing::instrument(skip_all, fields(base_dir = %base_dir.display(), recursive = recursive))]
pub async fn scan(
    base_dir: &Path,
    recursive: bool,
    extension: &str,
) -> Result<Vec<LocalGroup>, SyncError> {
    let metadata = tokio::fs::metadata(base_dir)
        .await
        .map_err(|e| SyncError::io(base_dir, e))?;
    if !metadata.is_dir() {
        return Err(SyncError::NotADirectory(base_dir.to_path_buf()));
    }

    let mut groups = Vec::new();
    let mut pending: Vec<(PathBuf, usize)> = vec![(base_dir.to_path_buf(), 0)];

    while let Some((dir, depth)) = pending.pop() {
        let listing = match read_listing(&dir, extension).await {
            Ok(listing) => listing,
            Err(err) if depth > 0 => {
                warn!(folder = %dir.display(), %err, "Skipping unreadable folder");
                continue;
            }
            Err(err) => return Err(err),
        };

        if recursive || depth == 0 {
            pending.extend(listing.subfolders.into_iter().map(|sub| (sub, depth + 1)));
        }

        if !listing.files.is_empty() {
            debug!(folder = %dir.display(), files = listing.files.len(), "Found route files");
            groups.push(LocalGroup::new(dir, listing.files));
        }
    }

    groups.sort_by(|a, b| a.folder.cmp(&b.folder));
    debug!(groups = groups.len(), "Scan complete");
    Ok(groups)
}

/// Lists the route files directly inside `folder`
///
/// Used at sync time to pick up files added since the scan. A folder that
/// no longer exists yields an empty list.
pub async fn list_route_files(folder: &Path, extension: &str) -> Result<Vec<PathBuf>, SyncError> {
    match read_listing(folder, extension).await {
        Ok(listing) => Ok(listing.files),
        Err(SyncError::PathNotFound(_)) => {
            debug!(folder = %folder.display(), "Folder vanished since scan");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}
