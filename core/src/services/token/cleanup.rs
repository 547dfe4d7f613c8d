//! Periodic sweep of expired revocations
//!
//! Complements the per-entry cleanup tasks: entries whose task was never
//! scheduled (no runtime at revoke time, or scheduling disabled) are still
//! reclaimed here.

use std::sync::Arc;
use tracing::{debug, info, warn};

use rt_shared::config::RevocationConfig;

use super::revocation::RevocationStore;

/// Configuration for the revocation sweeper
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable the background sweep
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl From<&RevocationConfig> for SweepConfig {
    fn from(config: &RevocationConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds.max(1),
            enabled: config.sweep_enabled,
        }
    }
}

/// Background maintenance for a [`RevocationStore`]
pub struct RevocationSweeper {
    store: Arc<RevocationStore>,
    config: SweepConfig,
}

impl RevocationSweeper {
    /// Create a new sweeper for the store
    pub fn new(store: Arc<RevocationStore>, config: SweepConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep
    pub fn run_once(&self) -> SweepResult {
        if !self.config.enabled {
            return SweepResult::default();
        }

        let purged = self.store.purge_expired();
        let result = SweepResult {
            entries_purged: purged,
            entries_remaining: self.store.size(),
        };

        if purged > 0 {
            info!(
                "Revocation sweep removed {} expired entries, {} remaining",
                result.entries_purged, result.entries_remaining
            );
        } else {
            debug!("Revocation sweep found nothing to remove");
        }

        result
    }

    /// Start the sweeper as a background task
    ///
    /// This spawns a tokio task that sweeps at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Revocation sweeper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Revocation sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_once();
            }
        });
    }
}

/// Result of a sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired entries removed
    pub entries_purged: usize,
    /// Entries left after the sweep
    pub entries_remaining: usize,
}
