//! Sync command - Upload local route folders to remote collections
//!
//! Provides the `ksync sync` CLI command which:
//! 1. Loads and validates the configuration
//! 2. Applies command-line overrides (`--clear`, `--recursive`)
//! 3. Builds the API client with pacing
//! 4. Runs the SyncRunner over every configured account and prints a summary

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use ksync_core::domain::UploadStatus;
use ksync_sync::runner::{AccountStatus, RunSummary, SyncRunner};

use super::{build_client, CommandContext};
use crate::output::{format_duration, plural, OutputFormatter};

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Show what would be synced without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Delete all routes of existing collections before uploading
    #[arg(long)]
    pub clear: bool,

    /// Scan nested subfolders without depth limit
    #[arg(long)]
    pub recursive: bool,
}

impl SyncCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();

        let mut config = ctx.load_config()?;
        if self.clear {
            config.clear_collections = true;
        }
        if self.recursive {
            config.scan_subfolders = true;
        }

        info!(
            config_path = %ctx.config_path.display(),
            directory = %config.directory.display(),
            accounts = config.users.len(),
            "Loaded configuration"
        );

        let client = build_client(&config)?;
        if self.dry_run {
            formatter.info("Dry run mode - no changes will be made");
        } else {
            formatter.info(&format!(
                "Syncing {} for {}...",
                config.directory.display(),
                plural(config.users.len(), "account")
            ));
        }

        let runner = SyncRunner::new(client.clone(), client, config).with_dry_run(self.dry_run);
        let summary = runner.run().await;

        if ctx.is_json() {
            let json =
                serde_json::to_value(&summary).context("Failed to serialize sync summary")?;
            formatter.print_json(&json);
        } else {
            print_summary(formatter.as_ref(), &summary);
        }

        Ok(())
    }
}

fn print_summary(formatter: &dyn OutputFormatter, summary: &RunSummary) {
    if summary.files_renamed > 0 {
        formatter.info(&format!(
            "Cleaned {}",
            plural(summary.files_renamed, "file name")
        ));
    }

    for account in &summary.accounts {
        match &account.status {
            AccountStatus::Skipped { reason } => {
                formatter.error(&format!("{}: skipped ({reason})", account.username));
            }
            AccountStatus::Planned { plan } => {
                formatter.success(&format!("{}: plan", account.username));
                for (name, group) in &plan.matched {
                    formatter.info(&format!(
                        "existing  {name}: {}",
                        plural(group.files.len(), "file")
                    ));
                }
                for (name, group) in &plan.unmatched {
                    formatter.info(&format!(
                        "new       {name}: {}",
                        plural(group.files.len(), "file")
                    ));
                }
                if plan.is_empty() {
                    formatter.info("nothing to sync");
                }
            }
            AccountStatus::Completed { report } => {
                let headline = format!(
                    "{}: uploaded {} in {}",
                    account.username,
                    plural(report.files_uploaded(), "file"),
                    format_duration(report.duration_ms)
                );
                if report.is_clean() {
                    formatter.success(&headline);
                } else {
                    formatter.warn(&headline);
                }

                if !report.collections_created.is_empty() {
                    formatter.info(&format!(
                        "Created:  {}",
                        report.collections_created.join(", ")
                    ));
                }
                if report.routes_deleted > 0 || report.route_delete_failures > 0 {
                    formatter.info(&format!(
                        "Cleared:  {} ({} failed)",
                        plural(report.routes_deleted as usize, "route"),
                        report.route_delete_failures
                    ));
                }
                for outcome in &report.outcomes {
                    if let UploadStatus::Failed { reason } = &outcome.status {
                        formatter.warn(&format!(
                            "{} -> {}: {reason}",
                            outcome.file.display(),
                            outcome.collection
                        ));
                    }
                }
                for error in &report.errors {
                    formatter.warn(error);
                }
            }
        }
    }

    if summary.accounts.is_empty() {
        formatter.warn("No accounts configured");
    }
}
