//! Token cleanup service for periodic expiry sweeps.
//!
//! The sweep is garbage collection of token history, not part of
//! correctness: it is scheduled independently of the credential flows, and
//! its failures are logged, never raised to them.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::repositories::TokenRepository;
use crate::services::clock::Clock;

use super::lifecycle::RefreshTokenLifecycle;

/// Configuration for the token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service sweeping expired tokens out of the store
pub struct TokenCleanupService<R: TokenRepository + 'static, C: Clock + 'static> {
    lifecycle: Arc<RefreshTokenLifecycle<R, C>>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository + 'static, C: Clock + 'static> TokenCleanupService<R, C> {
    /// Create a new token cleanup service
    pub fn new(lifecycle: Arc<RefreshTokenLifecycle<R, C>>, config: TokenCleanupConfig) -> Self {
        Self { lifecycle, config }
    }

    /// Run a single cleanup cycle
    ///
    /// Store failures end up in `CleanupResult::errors`; they never
    /// propagate out of the cycle.
    pub async fn run_cleanup(&self) -> CleanupResult {
        if !self.config.enabled {
            return CleanupResult::default();
        }

        info!("Starting token cleanup cycle");

        let mut result = CleanupResult::default();

        match self.lifecycle.sweep_expired_now().await {
            Ok(count) => {
                result.expired_tokens_deleted = count;
                info!("Deleted {} expired refresh tokens", count);
            }
            Err(e) => {
                error!("Failed to sweep expired tokens: {}", e);
                result.errors.push(format!("Expiry sweep error: {}", e));
            }
        }

        result
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs the sweep at regular intervals.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let result = self.run_cleanup().await;
                if !result.is_success() {
                    warn!("Cleanup completed with errors: {:?}", result.errors);
                }
            }
        });
    }
}

/// Result of a cleanup cycle
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired refresh tokens deleted
    pub expired_tokens_deleted: usize,
    /// Any errors encountered during the cycle
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
