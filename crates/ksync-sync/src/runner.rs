//! Multi-account sync runner
//!
//! Drives one complete invocation: optional filename cleaning, then for
//! every configured account in order:
//!
//! 1. authenticate
//! 2. list remote collections
//! 3. scan the local directory
//! 4. reconcile
//! 5. sync (or, in dry-run mode, report the plan)
//!
//! A failure in steps 1-3 skips that account only. Accounts share nothing
//! but the configuration.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use ksync_core::config::{Config, UserCredentials};
use ksync_core::domain::{reconcile, MatchResult, SyncReport};
use ksync_core::ports::{IAuthenticator, IRouteStore};

use crate::engine::SyncEngine;
use crate::{filenames, scanner};

/// What happened to one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccountStatus {
    /// The sync ran; partial failures are inside the report
    Completed { report: SyncReport },
    /// Dry run: what would be synced
    Planned { plan: MatchResult },
    /// The account was not synced
    Skipped { reason: String },
}

/// Result for one configured account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountReport {
    pub username: String,
    #[serde(flatten)]
    pub status: AccountStatus,
}

/// Result of a whole invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// One entry per configured account, in configuration order
    pub accounts: Vec<AccountReport>,
    /// Number of files renamed by filename cleaning
    pub files_renamed: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn skipped_accounts(&self) -> usize {
        self.accounts
            .iter()
            .filter(|a| matches!(a.status, AccountStatus::Skipped { .. }))
            .count()
    }

    /// Uploads across all completed accounts
    pub fn files_uploaded(&self) -> usize {
        self.reports().map(SyncReport::files_uploaded).sum()
    }

    /// Failed uploads across all completed accounts
    pub fn files_failed(&self) -> usize {
        self.reports().map(SyncReport::files_failed).sum()
    }

    /// True when any account was skipped or recorded a partial failure
    pub fn has_failures(&self) -> bool {
        self.skipped_accounts() > 0 || self.reports().any(|r| !r.is_clean())
    }

    fn reports(&self) -> impl Iterator<Item = &SyncReport> {
        self.accounts.iter().filter_map(|a| match &a.status {
            AccountStatus::Completed { report } => Some(report),
            _ => None,
        })
    }
}

/// Runs the sync for every configured account
pub struct SyncRunner {
    authenticator: Arc<dyn IAuthenticator>,
    store: Arc<dyn IRouteStore>,
    config: Config,
    dry_run: bool,
}

impl SyncRunner {
    pub fn new(
        authenticator: Arc<dyn IAuthenticator>,
        store: Arc<dyn IRouteStore>,
        config: Config,
    ) -> Self {
        Self {
            authenticator,
            store,
            config,
            dry_run: false,
        }
    }

    /// Stops each account after reconciliation and leaves local files and
    /// the remote store untouched.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the whole invocation
    ///
    /// Never fails: per-account problems are reported in the summary.
    #[tracing::instrument(skip_all, fields(accounts = self.config.users.len(), dry_run = self.dry_run))]
    pub async fn run(&self) -> RunSummary {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        if self.config.clean_filenames {
            summary.files_renamed = self.clean_filenames().await;
        }

        for credentials in &self.config.users {
            let status = self.run_account(credentials).await;
            if let AccountStatus::Skipped { reason } = &status {
                warn!(username = %credentials.username, %reason, "Account skipped");
            }
            summary.accounts.push(AccountReport {
                username: credentials.username.clone(),
                status,
            });
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            accounts = summary.accounts.len(),
            skipped = summary.skipped_accounts(),
            uploaded = summary.files_uploaded(),
            failed = summary.files_failed(),
            duration_ms = summary.duration_ms,
            "Run finished"
        );
        summary
    }

    async fn clean_filenames(&self) -> usize {
        if self.dry_run {
            info!("Dry run: not cleaning file names");
            return 0;
        }
        match filenames::clean_filenames(
            &self.config.directory,
            self.config.scan_subfolders,
            &self.config.route_extension,
        )
        .await
        {
            Ok(cleaned) => cleaned.renamed.len(),
            Err(err) => {
                warn!(%err, "Filename cleaning failed");
                0
            }
        }
    }

    #[tracing::instrument(skip_all, fields(username = %credentials.username))]
    async fn run_account(&self, credentials: &UserCredentials) -> AccountStatus {
        let session = match self.authenticator.authenticate(credentials).await {
            Ok(session) => session,
            Err(err) => {
                return AccountStatus::Skipped {
                    reason: format!("authentication failed: {err}"),
                }
            }
        };

        let remote_collections = match self.store.list_collections(&session).await {
            Ok(collections) => collections,
            Err(err) => {
                return AccountStatus::Skipped {
                    reason: format!("listing collections failed: {err}"),
                }
            }
        };

        let local_groups = match scanner::scan(
            &self.config.directory,
            self.config.scan_subfolders,
            &self.config.route_extension,
        )
        .await
        {
            Ok(groups) => groups,
            Err(err) => {
                return AccountStatus::Skipped {
                    reason: format!("scanning {} failed: {err}", self.config.directory.display()),
                }
            }
        };

        let plan = reconcile(&remote_collections, &local_groups, &self.config.directory);

        if self.dry_run {
            info!(
                matched = plan.matched.len(),
                unmatched = plan.unmatched.len(),
                "Dry run: planned sync"
            );
            return AccountStatus::Planned { plan };
        }

        let engine = SyncEngine::new(Arc::clone(&self.store), &self.config);
        let report = engine.sync(&session, &plan, &remote_collections).await;
        AccountStatus::Completed { report }
    }
}
