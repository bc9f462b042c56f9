/// Prometheus metrics for production observability.
///
/// A single global registry encoded by the `/metrics` endpoint. Handlers
/// record per-route counters and latency; the store size gauge is refreshed
/// on every scrape.
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use prometheus_client::encoding::{EncodeLabelSet, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::time::Instant;

pub static METRICS: Lazy<Arc<MetricsCollector>> = Lazy::new(|| Arc::new(MetricsCollector::new()));

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RequestLabels {
    /// Route name ("analyze", "save", "history", "stats", "info")
    pub route: String,
    /// Request status ("success", "validation_error", "storage_error")
    pub status: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RouteLabels {
    pub route: String,
}

pub struct MetricsCollector {
    registry: RwLock<Registry>,

    /// Total HTTP requests by route and status
    pub requests_total: Family<RequestLabels, Counter>,

    /// Request duration in seconds by route
    pub request_duration_seconds: Family<RouteLabels, Histogram>,

    /// Essays analyzed since startup
    pub analyses_total: Counter,

    /// Essays appended to the store since startup
    pub essays_stored_total: Counter,

    /// Records currently held by the store
    pub essays_in_store: Gauge,
}

impl MetricsCollector {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let requests_total = Family::<RequestLabels, Counter>::default();
        registry.register(
            "essay_requests",
            "Total HTTP requests by route and status",
            requests_total.clone(),
        );

        let request_duration_seconds =
            Family::<RouteLabels, Histogram>::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.0005, 2.0, 12))
            });
        registry.register(
            "essay_request_duration_seconds",
            "HTTP request duration in seconds by route",
            request_duration_seconds.clone(),
        );

        let analyses_total = Counter::default();
        registry.register(
            "essay_analyses",
            "Essays analyzed since startup",
            analyses_total.clone(),
        );

        let essays_stored_total = Counter::default();
        registry.register(
            "essay_stored",
            "Essays appended to the store since startup",
            essays_stored_total.clone(),
        );

        let essays_in_store = Gauge::default();
        registry.register(
            "essay_store_records",
            "Records currently held by the store",
            essays_in_store.clone(),
        );

        Self {
            registry: RwLock::new(registry),
            requests_total,
            request_duration_seconds,
            analyses_total,
            essays_stored_total,
            essays_in_store,
        }
    }

    pub fn record_request(&self, route: &str, status: &str, started: Instant) {
        self.requests_total
            .get_or_create(&RequestLabels {
                route: route.to_string(),
                status: status.to_string(),
            })
            .inc();
        self.request_duration_seconds
            .get_or_create(&RouteLabels {
                route: route.to_string(),
            })
            .observe(started.elapsed().as_secs_f64());
    }

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let registry = self.registry.read();
        let mut output = String::new();
        if encode(&mut output, &registry).is_err() {
            tracing::warn!("failed to encode metrics");
        }
        output
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
