#![allow(dead_code)]

use axum::Router;
use essay_metrics::config::ServerConfig;
use essay_metrics::server;
use essay_metrics::state::AppState;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Temp-dir-backed service for integration tests. The data file lives inside
/// the temp dir and disappears with it.
pub struct TestService {
    dir: TempDir,
    state: Arc<AppState>,
}

impl TestService {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Arc::new(test_config(dir.path()));
        let state = Arc::new(AppState::new(config).expect("app state"));
        Self { dir, state }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    pub fn data_path(&self) -> std::path::PathBuf {
        self.dir.path().join("essays.jsonl")
    }
}

pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        data_file: dir.join("essays.jsonl"),
        http_bind_address: "127.0.0.1:0".parse().expect("bind addr"),
        history_limit: 50,
        history_preview_chars: 800,
        graceful_shutdown_timeout_secs: 5,
    }
}
