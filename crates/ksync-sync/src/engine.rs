//! Folder to collection sync driver
//!
//! The [`SyncEngine`] applies a reconciliation result for one account to
//! the remote route store.
//!
//! ## Sync Flow
//!
//! 1. **Matched** destinations: resolve the collection id, optionally clear
//!    its routes, then upload every route file currently in the source
//!    folders (re-listed from disk).
//! 2. **Unmatched** destinations: create the collection once, then upload
//!    the files found by the scan.
//!
//! Every remote call is awaited before the next one starts. A failure
//! affects only the file or destination it belongs to; nothing is retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use ksync_core::config::Config;
use ksync_core::domain::collection::find_by_exact_name;
use ksync_core::domain::{
    AccountSession, CollectionId, FolderGroup, MatchResult, RemoteCollection, SyncOutcome,
    SyncReport,
};
use ksync_core::ports::IRouteStore;

use crate::scanner;

/// Description given to collections created by a sync
const NEW_COLLECTION_DESCRIPTION: &str = "";

/// Per-account sync driver
///
/// ## Dependencies
///
/// - `store`: remote collection and route operations
/// - `clear_collections`: delete existing routes of matched collections
///   before uploading
/// - `route_extension`: extension used when re-listing source folders
pub struct SyncEngine {
    store: Arc<dyn IRouteStore>,
    clear_collections: bool,
    route_extension: String,
}

impl SyncEngine {
    /// Creates an engine using the sync settings of `config`
    pub fn new(store: Arc<dyn IRouteStore>, config: &Config) -> Self {
        Self::with_options(store, config.clear_collections, &config.route_extension)
    }

    /// Creates an engine with explicit settings
    pub fn with_options(
        store: Arc<dyn IRouteStore>,
        clear_collections: bool,
        route_extension: &str,
    ) -> Self {
        Self {
            store,
            clear_collections,
            route_extension: route_extension.to_string(),
        }
    }

    pub fn clear_collections(&self) -> bool {
        self.clear_collections
    }

    /// Applies `plan` for the account behind `session`
    ///
    /// `remote_collections` is the listing the plan was reconciled against;
    /// it is used to resolve the ids of matched destinations.
    ///
    /// Never fails as a whole: every failure is logged and recorded in the
    /// returned report.
    #[tracing::instrument(skip_all, fields(username = %session.username))]
    pub async fn sync(
        &self,
        session: &AccountSession,
        plan: &MatchResult,
        remote_collections: &[RemoteCollection],
    ) -> SyncReport {
        let start = Instant::now();
        let mut report = SyncReport::default();

        info!(
            matched = plan.matched.len(),
            unmatched = plan.unmatched.len(),
            clear = self.clear_collections,
            "Starting sync"
        );

        for (name, group) in &plan.matched {
            self.sync_matched(session, name, group, remote_collections, &mut report)
                .await;
        }

        for (name, group) in &plan.unmatched {
            self.sync_unmatched(session, name, group, &mut report).await;
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            uploaded = report.files_uploaded(),
            failed = report.files_failed(),
            created = report.collections_created.len(),
            routes_deleted = report.routes_deleted,
            errors = report.errors.len(),
            duration_ms = report.duration_ms,
            "Sync completed"
        );

        report
    }

    // ========================================================================
    // Matched destinations
    // ========================================================================

    async fn sync_matched(
        &self,
        session: &AccountSession,
        name: &str,
        group: &FolderGroup,
        remote_collections: &[RemoteCollection],
        report: &mut SyncReport,
    ) {
        let Some(collection) = find_by_exact_name(remote_collections, name) else {
            let msg = format!("Collection '{name}' is no longer in the remote listing");
            error!(%msg);
            report.errors.push(msg);
            return;
        };

        if self.clear_collections {
            self.clear_collection(session, collection, report).await;
        }

        let files = self.current_files(&group.folders, report).await;
        debug!(collection = name, files = files.len(), "Uploading to existing collection");
        self.upload_all(session, &collection.id, name, &files, report)
            .await;
    }

    /// Deletes every listed route of `collection`
    ///
    /// All deletes finish before the caller starts uploading.
    async fn clear_collection(
        &self,
        session: &AccountSession,
        collection: &RemoteCollection,
        report: &mut SyncReport,
    ) {
        let routes = match self.store.list_routes(session, &collection.id).await {
            Ok(routes) => routes,
            Err(err) => {
                let msg = format!(
                    "Failed to list routes of '{}', not clearing: {err}",
                    collection.name
                );
                warn!(%msg);
                report.errors.push(msg);
                return;
            }
        };

        info!(collection = %collection.name, routes = routes.len(), "Clearing collection");

        for route in &routes {
            match self.store.delete_route(session, &route.id).await {
                Ok(()) => report.routes_deleted += 1,
                Err(err) => {
                    warn!(route_id = %route.id, collection = %collection.name, %err, "Failed to delete route");
                    report.route_delete_failures += 1;
                }
            }
        }
    }

    /// Re-lists the source folders so files added since the scan are included
    async fn current_files(&self, folders: &[PathBuf], report: &mut SyncReport) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for folder in folders {
            match scanner::list_route_files(folder, &self.route_extension).await {
                Ok(found) => files.extend(found),
                Err(err) => {
                    let msg = format!("Failed to list {}: {err}", folder.display());
                    warn!(%msg);
                    report.errors.push(msg);
                }
            }
        }
        files
    }

    // ========================================================================
    // Unmatched destinations
    // ========================================================================

    async fn sync_unmatched(
        &self,
        session: &AccountSession,
        name: &str,
        group: &FolderGroup,
        report: &mut SyncReport,
    ) {
        let created = match self
            .store
            .create_collection(session, name, NEW_COLLECTION_DESCRIPTION)
            .await
        {
            Ok(created) => created,
            Err(err) => {
                let msg = format!(
                    "Failed to create collection '{name}', skipping {} file(s): {err}",
                    group.files.len()
                );
                error!(%msg);
                report.collections_failed.push(name.to_string());
                report.errors.push(msg);
                return;
            }
        };

        info!(collection = name, id = %created.id, "Created collection");
        report.collections_created.push(name.to_string());

        self.upload_all(session, &created.id, name, &group.files, report)
            .await;
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    async fn upload_all(
        &self,
        session: &AccountSession,
        collection_id: &CollectionId,
        collection_name: &str,
        files: &[PathBuf],
        report: &mut SyncReport,
    ) {
        for file in files {
            report
                .outcomes
                .push(self.upload(session, collection_id, collection_name, file).await);
        }
    }

    async fn upload(
        &self,
        session: &AccountSession,
        collection_id: &CollectionId,
        collection_name: &str,
        file: &Path,
    ) -> SyncOutcome {
        match self
            .store
            .import_route_file(session, collection_id, file)
            .await
        {
            Ok(()) => {
                info!(file = %file.display(), collection = collection_name, "Uploaded route");
                SyncOutcome::uploaded(file.to_path_buf(), collection_name)
            }
            Err(err) => {
                warn!(file = %file.display(), collection = collection_name, %err, "Upload failed");
                SyncOutcome::failed(file.to_path_buf(), collection_name, err.to_string())
            }
        }
    }
}
