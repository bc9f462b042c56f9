//! HTTP surface: request handlers and router assembly.

use crate::error::ApiError;
use crate::health;
use crate::metrics::METRICS;
use crate::model::{
    AnalyzeRequest, AnalyzeResponse, EssaySummary, HistoryResponse, SaveRequest, SaveResponse,
    ServiceInfo, StatsResponse,
};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Instant;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/analyze", post(analyze_essay))
        .route("/save", post(save_essay))
        .route("/history", get(history))
        .route("/stats", get(stats))
        .route("/health", get(health::liveness_handler))
        .route("/ready", get(health::readiness_handler))
        .route("/health/components", get(health::components_handler))
        .route("/metrics", get(metrics_endpoint))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Essay metrics service".to_string(),
        status: "running".to_string(),
        endpoints: vec![
            "/analyze".to_string(),
            "/save".to_string(),
            "/history".to_string(),
            "/stats".to_string(),
        ],
    })
}

async fn analyze_essay(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let started = Instant::now();
    let text = request.text().unwrap_or_default();

    match state.analyze_text(text) {
        Ok(result) => {
            METRICS.analyses_total.inc();
            METRICS.record_request("analyze", "success", started);
            tracing::debug!(
                word_count = result.word_count,
                clarity = result.clarity_score,
                tone = %result.tone,
                "essay analyzed"
            );
            Ok(Json(AnalyzeResponse { ok: true, result }))
        }
        Err(error) => {
            METRICS.record_request("analyze", error.category(), started);
            Err(error)
        }
    }
}

async fn save_essay(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveRequest>,
) -> Result<(StatusCode, Json<SaveResponse>), ApiError> {
    let started = Instant::now();
    let text = request.text().unwrap_or_default().to_string();

    match state.save_essay(text, request.result.clone()) {
        Ok(id) => {
            METRICS.essays_stored_total.inc();
            METRICS.record_request("save", "success", started);
            tracing::info!(id, has_result = request.result.is_some(), "essay saved");
            Ok((StatusCode::CREATED, Json(SaveResponse { ok: true, id })))
        }
        Err(error) => {
            METRICS.record_request("save", error.category(), started);
            Err(error)
        }
    }
}

async fn history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let started = Instant::now();
    let preview_chars = state.config().history_preview_chars;
    let history = state
        .history()
        .into_iter()
        .map(|essay| EssaySummary::from_stored(essay, preview_chars))
        .collect();
    METRICS.record_request("history", "success", started);
    Json(HistoryResponse { ok: true, history })
}

async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let started = Instant::now();
    let stats = state.stats();
    METRICS.record_request("stats", "success", started);
    Json(StatsResponse {
        ok: true,
        total: stats.total,
        avg_clarity: stats.avg_clarity,
        avg_readability: stats.avg_readability,
    })
}

async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> (StatusCode, String) {
    METRICS.essays_in_store.set(state.store().len() as i64);
    (StatusCode::OK, METRICS.encode())
}

/// Permissive CORS for browser clients.
/// Preflight requests are answered here and never reach a handler.
async fn cors(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS;
    let mut response = if preflight {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}
