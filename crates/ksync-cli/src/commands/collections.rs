//! Collections command - Inspect and manage remote collections
//!
//! `ksync collections list` prints the collections of every configured
//! account (or of one, with `--user`). `ksync collections delete` removes a
//! single collection by id.

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use tracing::info;

use ksync_core::config::{Config, UserCredentials};
use ksync_core::domain::CollectionId;
use ksync_core::ports::{IAuthenticator, IRouteStore};

use super::{build_client, CommandContext};
use crate::output::plural;

#[derive(Debug, Subcommand)]
pub enum CollectionsCommand {
    /// List remote collections
    List {
        /// Only this account
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete a remote collection
    Delete {
        /// Account owning the collection
        #[arg(long)]
        user: String,
        /// Collection id
        id: String,
    },
}

impl CollectionsCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let config = ctx.load_config()?;
        match self {
            CollectionsCommand::List { user } => execute_list(ctx, &config, user.as_deref()).await,
            CollectionsCommand::Delete { user, id } => {
                execute_delete(ctx, &config, user, id).await
            }
        }
    }
}

/// Accounts addressed by an optional `--user` filter
fn select_users<'a>(config: &'a Config, user: Option<&str>) -> Result<Vec<&'a UserCredentials>> {
    let selected: Vec<_> = config
        .users
        .iter()
        .filter(|u| user.map_or(true, |name| u.username == name))
        .collect();
    match (user, selected.is_empty()) {
        (Some(name), true) => Err(anyhow!("No configured account named '{name}'")),
        _ => Ok(selected),
    }
}

async fn execute_list(ctx: &CommandContext, config: &Config, user: Option<&str>) -> Result<()> {
    let formatter = ctx.formatter();
    let client = build_client(config)?;
    let mut accounts = Vec::new();

    for credentials in select_users(config, user)? {
        let listing = match client.authenticate(credentials).await {
            Ok(session) => client.list_collections(&session).await,
            Err(err) => Err(err),
        };

        match listing {
            Ok(collections) => {
                info!(username = %credentials.username, count = collections.len(), "Listed collections");
                if ctx.is_json() {
                    accounts.push(serde_json::json!({
                        "username": credentials.username,
                        "collections": collections,
                    }));
                } else {
                    formatter.success(&format!(
                        "{}: {}",
                        credentials.username,
                        plural(collections.len(), "collection")
                    ));
                    for collection in &collections {
                        formatter.info(&format!("{:<12} {}", collection.id.as_str(), collection.name));
                    }
                }
            }
            Err(err) => {
                if ctx.is_json() {
                    accounts.push(serde_json::json!({
                        "username": credentials.username,
                        "error": err.to_string(),
                    }));
                } else {
                    formatter.error(&format!("{}: {err}", credentials.username));
                }
            }
        }
    }

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({ "accounts": accounts }));
    }
    Ok(())
}

async fn execute_delete(
    ctx: &CommandContext,
    config: &Config,
    user: &str,
    id: &str,
) -> Result<()> {
    let formatter = ctx.formatter();
    let collection_id = CollectionId::new(id).context("Invalid collection id")?;

    let credentials = select_users(config, Some(user))?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No configured account named '{user}'"))?;

    let client = build_client(config)?;
    let session = client
        .authenticate(credentials)
        .await
        .with_context(|| format!("Failed to authenticate {user}"))?;
    client
        .delete_collection(&session, &collection_id)
        .await
        .with_context(|| format!("Failed to delete collection {collection_id}"))?;

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({
            "success": true,
            "username": user,
            "deleted": collection_id.as_str(),
        }));
    } else {
        formatter.success(&format!("Deleted collection {collection_id} of {user}"));
    }
    Ok(())
}
