//! In-place cleaning of route file names
//!
//! Some exported route files carry characters that the dashboard or other
//! filesystems reject. Each such character is replaced with `-`, runs of two
//! or more whitespace characters become a single space, and the result is
//! trimmed.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::scanner;
use crate::SyncError;

/// Characters replaced with `-`
const UNSAFE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Counts of a cleaning pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanSummary {
    /// Files renamed, as `(old, new)` pairs
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Files left alone because the cleaned name was taken or the rename failed
    pub skipped: Vec<PathBuf>,
}

/// Returns the cleaned form of a file name
pub fn clean_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut whitespace_run = String::new();

    for c in name.chars() {
        if c.is_whitespace() {
            whitespace_run.push(c);
            continue;
        }
        flush_whitespace(&mut cleaned, &mut whitespace_run);
        cleaned.push(if UNSAFE_CHARS.contains(&c) { '-' } else { c });
    }
    flush_whitespace(&mut cleaned, &mut whitespace_run);

    cleaned.trim().to_string()
}

fn flush_whitespace(out: &mut String, run: &mut String) {
    if run.chars().count() >= 2 {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

/// Renames every route file under `base_dir` whose name needs cleaning
///
/// Walks the same folders as [`scanner::scan`] with the same `recursive`
/// setting. A file whose cleaned name already exists is left alone.
///
/// # Errors
/// Returns an error only if `base_dir` itself cannot be scanned. Failed
/// renames are logged and reported in [`CleanSummary::skipped`].
#[tracing::instrument(skip_all, fields(base_dir = %base_dir.display()))]
pub async fn clean_filenames(
    base_dir: &Path,
    recursive: bool,
    extension: &str,
) -> Result<CleanSummary, SyncError> {
    let groups = scanner::scan(base_dir, recursive, extension).await?;
    let mut summary = CleanSummary::default();

    for file in groups.into_iter().flat_map(|g| g.files) {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let cleaned = clean_name(name);
        if cleaned == name || cleaned.is_empty() {
            continue;
        }

        let target = file.with_file_name(&cleaned);
        if tokio::fs::try_exists(&target).await.unwrap_or(true) {
            warn!(file = %file.display(), target = %cleaned, "Cleaned name already exists, skipping");
            summary.skipped.push(file);
            continue;
        }

        match tokio::fs::rename(&file, &target).await {
            Ok(()) => {
                debug!(from = name, to = %cleaned, "Renamed route file");
                summary.renamed.push((file, target));
            }
            Err(err) => {
                warn!(file = %file.display(), %err, "Failed to rename route file");
                summary.skipped.push(file);
            }
        }
    }

    if !summary.renamed.is_empty() {
        info!(renamed = summary.renamed.len(), skipped = summary.skipped.len(), "Cleaned file names");
    }
    Ok(summary)
}
