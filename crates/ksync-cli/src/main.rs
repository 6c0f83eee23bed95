//! KSync CLI - Command-line interface for KSync
//!
//! Provides commands for:
//! - Syncing local route folders to remote collections
//! - Listing and deleting remote collections
//! - Inspecting and validating the configuration
//! - Generating shell completions

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ksync_core::config::{Config, LoggingConfig};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    collections::CollectionsCommand, completions::CompletionsCommand, config::ConfigCommand,
    sync::SyncCommand, CommandContext,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "ksync",
    version,
    about = "Sync local route folders to Hammerhead collections"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload route folders to their collections
    Sync(SyncCommand),
    /// Inspect and manage remote collections
    #[command(subcommand)]
    Collections(CollectionsCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Builds the log filter: `RUST_LOG` wins, then `-v`/`-vv`, then the
/// configured level.
fn log_filter(verbose: u8, quiet: bool, logging: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (verbose, quiet) {
        (0, true) => "warn",
        (0, false) => logging.level.as_str(),
        (1, _) => "debug",
        _ => "trace",
    };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_tracing(cli: &Cli, config_path: &std::path::Path) {
    // A broken config is reported by the command itself; logging falls back
    // to defaults until then.
    let logging = Config::load(config_path)
        .map(|c| c.logging)
        .unwrap_or_default();
    let filter = log_filter(cli.verbose, cli.quiet, &logging);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    init_tracing(&cli, &config_path);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let ctx = CommandContext {
        format,
        quiet: cli.quiet,
        config_path,
    };

    match cli.command {
        Commands::Sync(cmd) => cmd.execute(&ctx).await,
        Commands::Collections(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
        Commands::Completions(cmd) => cmd.execute(&ctx).await,
    }
}
