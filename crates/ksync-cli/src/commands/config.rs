//! Config command - View and validate KSync configuration
//!
//! Provides the `ksync config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON) with passwords redacted
//! 2. Validates the configuration file and reports every error
//! 3. Prints the configuration file path in use

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use ksync_core::config::Config;

use super::CommandContext;
use crate::output::plural;

/// Placeholder printed instead of passwords
const REDACTED: &str = "********";

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(ctx),
            ConfigCommand::Validate => execute_validate(ctx),
            ConfigCommand::Path => execute_path(ctx),
        }
    }
}

/// Copy of `config` safe to print
fn redacted(config: &Config) -> Config {
    let mut shown = config.clone();
    for user in &mut shown.users {
        user.password = REDACTED.to_string();
    }
    shown
}

fn execute_show(ctx: &CommandContext) -> Result<()> {
    let formatter = ctx.formatter();
    let config = Config::load(&ctx.config_path)?;
    let shown = redacted(&config);

    info!(config_path = %ctx.config_path.display(), "Showing configuration");

    if ctx.is_json() {
        let json =
            serde_json::to_value(&shown).context("Failed to serialize configuration to JSON")?;
        formatter.print_json(&json);
    } else {
        formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
        formatter.info("");

        let yaml =
            serde_yaml::to_string(&shown).context("Failed to serialize configuration to YAML")?;
        for line in yaml.lines() {
            formatter.info(line);
        }
    }

    Ok(())
}

fn execute_validate(ctx: &CommandContext) -> Result<()> {
    let formatter = ctx.formatter();
    let config_path = &ctx.config_path;

    let config = match Config::load(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            if ctx.is_json() {
                formatter.print_json(&serde_json::json!({
                    "valid": false,
                    "config_path": config_path.display().to_string(),
                    "errors": [format!("{e:#}")],
                }));
            } else {
                formatter.error(&format!("{e:#}"));
            }
            anyhow::bail!("Configuration could not be loaded");
        }
    };

    info!(config_path = %config_path.display(), "Validating configuration");
    let errors = config.validate();

    if ctx.is_json() {
        let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        formatter.print_json(&serde_json::json!({
            "valid": errors.is_empty(),
            "config_path": config_path.display().to_string(),
            "errors": error_strings,
        }));
    } else if errors.is_empty() {
        formatter.success("Configuration is valid");
        formatter.info(&format!("File: {}", config_path.display()));
    } else {
        formatter.error(&format!("Configuration has {}:", plural(errors.len(), "error")));
        formatter.info(&format!("File: {}", config_path.display()));
        formatter.info("");
        for error in &errors {
            formatter.info(&format!("  {} - {}", error.field, error.message));
        }
    }

    if !errors.is_empty() {
        anyhow::bail!("Configuration is invalid");
    }
    Ok(())
}

fn execute_path(ctx: &CommandContext) -> Result<()> {
    if ctx.is_json() {
        ctx.formatter().print_json(&serde_json::json!({
            "config_path": ctx.config_path.display().to_string(),
            "exists": ctx.config_path.exists(),
        }));
    } else {
        // Printed even with --quiet so the path can be used in scripts
        println!("{}", ctx.config_path.display());
    }
    Ok(())
}
