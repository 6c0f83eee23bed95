//! Reconciliation of local folder groups against remote collections
//!
//! Partitions the scanner's folder groups into groups whose name already
//! exists as a remote collection (`matched`) and groups that need a new
//! collection (`unmatched`).
//!
//! ## Rules
//!
//! - The base directory's own files are never part of either partition.
//! - Names are compared case-insensitively; the matched entry is keyed by
//!   the remote spelling, the unmatched entry by the local folder name.
//! - If the remote store holds duplicate names, the first collection in
//!   listing order wins.
//! - Several local folders resolving to the same name accumulate into one
//!   entry, so each destination is handled once per run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::collection::RemoteCollection;
use super::local::LocalGroup;

/// Files destined for one collection, with the folders they came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderGroup {
    /// Local folders contributing to this destination, in scan order
    pub folders: Vec<PathBuf>,
    /// Absolute paths of the scanned route files
    pub files: Vec<PathBuf>,
}

impl FolderGroup {
    fn absorb(&mut self, group: &LocalGroup) {
        if !self.folders.contains(&group.folder) {
            self.folders.push(group.folder.clone());
        }
        self.files.extend(group.files.iter().cloned());
    }
}

/// Outcome of reconciling local groups with the remote listing
///
/// Every non-base local group lands in exactly one of the two maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Remote collection name -> files for that existing collection
    pub matched: BTreeMap<String, FolderGroup>,
    /// Local folder name -> files for a collection that must be created
    pub unmatched: BTreeMap<String, FolderGroup>,
}

impl MatchResult {
    /// Returns true when there is nothing to sync
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty() && self.unmatched.is_empty()
    }

    /// Number of scanned files headed for existing collections
    pub fn matched_file_count(&self) -> usize {
        self.matched.values().map(|g| g.files.len()).sum()
    }

    /// Number of scanned files headed for collections to be created
    pub fn unmatched_file_count(&self) -> usize {
        self.unmatched.values().map(|g| g.files.len()).sum()
    }
}

/// Partitions `local_groups` into matched and unmatched destinations.
///
/// # Arguments
/// * `remote_collections` - Current remote listing, in listing order
/// * `local_groups` - Scanner output, in scan order
/// * `base_dir` - The scanned base directory; its group is skipped
pub fn reconcile(
    remote_collections: &[RemoteCollection],
    local_groups: &[LocalGroup],
    base_dir: &Path,
) -> MatchResult {
    let mut result = MatchResult::default();

    for group in local_groups {
        if group.folder == base_dir {
            debug!(base_dir = %base_dir.display(), "Skipping files in base folder");
            continue;
        }

        let collection_name = group.folder_name();

        match remote_collections
            .iter()
            .find(|c| c.matches_name(&collection_name))
        {
            Some(found) => {
                debug!(folder = %group.folder.display(), collection = %found.name, "Matched collection");
                result
                    .matched
                    .entry(found.name.clone())
                    .or_default()
                    .absorb(group);
            }
            None => {
                debug!(folder = %group.folder.display(), collection = %collection_name, "New collection");
                result
                    .unmatched
                    .entry(collection_name)
                    .or_default()
                    .absorb(group);
            }
        }
    }

    info!(
        matched = result.matched.len(),
        matched_files = result.matched_file_count(),
        new = result.unmatched.len(),
        new_files = result.unmatched_file_count(),
        "Reconciled local folders with remote collections"
    );

    result
}
