pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod server;
pub mod shutdown;
pub mod state;
pub mod store;

pub use aggregate::aggregate;
pub use analysis::analyze;
pub use config::{CliArgs, ServerConfig};
pub use error::ApiError;
pub use logging::{LoggingConfig, init_logging};
pub use shutdown::{ShutdownConfig, ShutdownCoordinator};
pub use state::AppState;
pub use store::EssayStore;

use anyhow::Result;
use std::{future::IntoFuture, sync::Arc};
use tokio::net::TcpListener;

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(config.clone())?);

    tracing::info!(
        bind = %config.http_bind_address,
        data_file = %config.data_file.display(),
        stored = state.store().len(),
        "starting essay metrics server",
    );

    let shutdown_config =
        ShutdownConfig::default().with_total_timeout(config.graceful_shutdown_timeout_secs);
    let coordinator = Arc::new(ShutdownCoordinator::new(shutdown_config));

    let router = server::router(state.clone());
    let listener = TcpListener::bind(config.http_bind_address).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(bind = %actual_addr, "listening");

    let shutdown_coordinator = coordinator.clone();
    let server_future = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_coordinator.wait_for_signal().await;
        })
        .into_future();

    let server_result = server_future.await;

    tracing::info!("server stopped, flushing store");
    if let Err(error) = coordinator.finalize(state).await {
        tracing::error!(%error, "error during shutdown");
    }

    server_result.map_err(anyhow::Error::from)
}
