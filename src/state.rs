use crate::aggregate::aggregate;
use crate::analysis::analyze;
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::model::{AggregateStats, AnalysisResult, StoredEssay};
use crate::store::EssayStore;
use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared application state. The store is the only stateful piece; the
/// engine and aggregator are pure and hang off this type purely so handlers
/// have one place to call into.
pub struct AppState {
    config: Arc<ServerConfig>,
    store: EssayStore,
    /// Analyses performed since startup, for the info endpoint and health details.
    analyze_ops: AtomicU64,
    /// Saves performed since startup.
    save_ops: AtomicU64,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Result<Self> {
        let store = EssayStore::open(&config.data_file)?;
        Ok(Self {
            config,
            store,
            analyze_ops: AtomicU64::new(0),
            save_ops: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> Arc<ServerConfig> {
        self.config.clone()
    }

    pub fn store(&self) -> &EssayStore {
        &self.store
    }

    /// Boundary validation plus the pure engine. The engine itself never
    /// fails; the only error here is blank input.
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisResult, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::no_text());
        }
        self.analyze_ops.fetch_add(1, Ordering::Relaxed);
        Ok(analyze(text))
    }

    pub fn save_essay(
        &self,
        text: String,
        result: Option<AnalysisResult>,
    ) -> Result<u64, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::no_text());
        }
        let id = self.store.append(text, result)?;
        self.save_ops.fetch_add(1, Ordering::Relaxed);
        Ok(id)
    }

    pub fn history(&self) -> Vec<StoredEssay> {
        self.store.list_recent(self.config.history_limit)
    }

    pub fn stats(&self) -> AggregateStats {
        aggregate(&self.store.results())
    }

    pub fn analyze_op_count(&self) -> u64 {
        self.analyze_ops.load(Ordering::Relaxed)
    }

    pub fn save_op_count(&self) -> u64 {
        self.save_ops.load(Ordering::Relaxed)
    }
}
