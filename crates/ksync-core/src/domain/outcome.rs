//! Per-file sync outcomes and per-account sync reports

use std::path::PathBuf;

use serde::Serialize;

/// Terminal state of a single upload attempt
///
/// Every upload starts pending and ends either uploaded or failed; there is
/// no intermediate retry state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadStatus {
    Uploaded,
    Failed { reason: String },
}

/// Result of attempting to upload one local file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    /// Local file that was uploaded
    pub file: PathBuf,
    /// Name of the destination collection
    pub collection: String,
    #[serde(flatten)]
    pub status: UploadStatus,
}

impl SyncOutcome {
    pub fn uploaded(file: PathBuf, collection: impl Into<String>) -> Self {
        Self {
            file,
            collection: collection.into(),
            status: UploadStatus::Uploaded,
        }
    }

    pub fn failed(file: PathBuf, collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file,
            collection: collection.into(),
            status: UploadStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, UploadStatus::Uploaded)
    }
}

/// Summary of one account's sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// One entry per attempted upload, in attempt order
    pub outcomes: Vec<SyncOutcome>,
    /// Names of collections created during this run
    pub collections_created: Vec<String>,
    /// Names of collections whose creation failed (their files were skipped)
    pub collections_failed: Vec<String>,
    /// Number of remote routes deleted while clearing collections
    pub routes_deleted: u32,
    /// Number of remote route deletions that failed
    pub route_delete_failures: u32,
    /// Descriptions of non-fatal failures not tied to a single upload
    pub errors: Vec<String>,
    /// Wall-clock duration of the sync in milliseconds
    pub duration_ms: u64,
}

impl SyncReport {
    pub fn files_uploaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn files_failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    /// True when no partial failure of any kind was recorded
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
            && self.collections_failed.is_empty()
            && self.route_delete_failures == 0
            && self.files_failed() == 0
    }
}
