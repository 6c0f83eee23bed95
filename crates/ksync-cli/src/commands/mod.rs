pub mod collections;
pub mod completions;
pub mod config;
pub mod sync;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use ksync_api::{HammerheadClient, RandomPacer};
use ksync_core::config::Config;

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Global options shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub format: OutputFormat,
    pub quiet: bool,
    pub config_path: PathBuf,
}

impl CommandContext {
    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format, self.quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Loads and validates the configuration file
    pub fn load_config(&self) -> Result<Config> {
        Config::load_validated(&self.config_path)
    }
}

/// Builds the API client for `config`, with pacing attached when enabled
pub fn build_client(config: &Config) -> Result<Arc<HammerheadClient>> {
    let mut client = HammerheadClient::from_config(&config.api)?;
    if let Some(pacer) = RandomPacer::from_config(&config.pacing) {
        client = client.with_pacer(pacer);
    }
    Ok(Arc::new(client))
}
