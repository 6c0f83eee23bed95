//! Random pause between state-mutating API calls
//!
//! The dashboard API throttles bursts of writes without publishing a limit.
//! [`RandomPacer`] waits a uniformly random whole number of seconds within
//! configured bounds after each create, delete or import.

use std::sync::Arc;
use std::time::Duration;

use ksync_core::config::PacingConfig;
use ksync_core::ports::IPacer;
use rand::Rng;
use tracing::info;

/// Pacer sleeping a random number of seconds in `[min_secs, max_secs]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPacer {
    min_secs: u64,
    max_secs: u64,
}

impl RandomPacer {
    /// Creates a pacer; swapped bounds are normalized.
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
        }
    }

    /// Builds the pacer described by the `pacing` configuration section
    ///
    /// Returns `None` when pacing is disabled.
    pub fn from_config(config: &PacingConfig) -> Option<Arc<dyn IPacer>> {
        if !config.enabled {
            return None;
        }
        Some(Arc::new(Self::new(config.min_secs, config.max_secs)))
    }

    /// Lower bound in seconds
    pub fn min_secs(&self) -> u64 {
        self.min_secs
    }

    /// Upper bound in seconds
    pub fn max_secs(&self) -> u64 {
        self.max_secs
    }

    /// Draws the next delay
    pub fn next_delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }
}

#[async_trait::async_trait]
impl IPacer for RandomPacer {
    async fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        info!(seconds = delay.as_secs(), "Pausing before next request");
        tokio::time::sleep(delay).await;
    }
}
