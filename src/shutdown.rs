//! Graceful shutdown coordination.
//!
//! Listens for SIGTERM/ctrl-c, drains the axum server through
//! `with_graceful_shutdown`, then flushes the store under a bounded timeout
//! so a slow disk cannot hold the process hostage.

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ShutdownConfig {
    /// Total budget for post-drain cleanup before giving up.
    pub total_timeout: Duration,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            total_timeout: Duration::from_secs(15),
        }
    }
}

impl ShutdownConfig {
    pub fn with_total_timeout(mut self, timeout_secs: u64) -> Self {
        self.total_timeout = Duration::from_secs(timeout_secs);
        self
    }
}

pub struct ShutdownCoordinator {
    config: ShutdownConfig,
    token: CancellationToken,
}

impl ShutdownCoordinator {
    pub fn new(config: ShutdownConfig) -> Self {
        Self {
            config,
            token: CancellationToken::new(),
        }
    }

    /// Token for async tasks that want to observe shutdown.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Begin shutdown without an external signal (used by tests).
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Resolves when SIGTERM or ctrl-c arrives, or when `trigger` is called.
    pub async fn wait_for_signal(&self) {
        let token = self.token.clone();

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(error) => {
                    warn!(%error, "failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("ctrl-c received, shutting down");
            }
            _ = terminate => {
                info!("SIGTERM received, shutting down");
            }
            _ = token.cancelled() => {
                info!("shutdown triggered");
            }
        }
        self.token.cancel();
    }

    /// Post-drain cleanup: flush the store to disk.
    pub async fn finalize(&self, state: Arc<AppState>) -> Result<()> {
        let flush = tokio::task::spawn_blocking(move || state.store().flush());
        match timeout(self.config.total_timeout, flush).await {
            Ok(joined) => joined
                .context("store flush task panicked")?
                .context("failed to flush store during shutdown")?,
            Err(_) => {
                anyhow::bail!(
                    "store flush did not complete within {:?}",
                    self.config.total_timeout
                );
            }
        }
        info!("shutdown cleanup complete");
        Ok(())
    }
}
