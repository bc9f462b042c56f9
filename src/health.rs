use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health status for a component or the overall system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Functioning but with partial failures
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Degraded still serves traffic
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Combines two health statuses, returning the worse of the two
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => HealthStatus::Unhealthy,
            (HealthStatus::Degraded, _) | (_, HealthStatus::Degraded) => HealthStatus::Degraded,
            _ => HealthStatus::Healthy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub component: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ComponentHealth {
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            error: None,
            details: None,
        }
    }

    pub fn healthy_with_details(component: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            details: Some(details),
            ..Self::healthy(component)
        }
    }

    pub fn unhealthy(component: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            error: Some(error.into()),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub components: Vec<ComponentHealth>,
}

/// Store check: the data file must still be appendable. Runs the same flush
/// path the save handler uses, so a full disk or yanked volume shows up here
/// before clients see 500s.
fn check_store(state: &AppState) -> ComponentHealth {
    match state.store().flush() {
        Ok(()) => ComponentHealth::healthy_with_details(
            "store",
            serde_json::json!({
                "path": state.store().path().display().to_string(),
                "records": state.store().len(),
            }),
        ),
        Err(error) => ComponentHealth::unhealthy("store", error.to_string()),
    }
}

fn check_engine(state: &AppState) -> ComponentHealth {
    ComponentHealth::healthy_with_details(
        "analysis_engine",
        serde_json::json!({
            "analyses": state.analyze_op_count(),
            "saves": state.save_op_count(),
        }),
    )
}

fn overall(components: &[ComponentHealth]) -> HealthStatus {
    components
        .iter()
        .fold(HealthStatus::Healthy, |acc, c| acc.combine(c.status))
}

/// Liveness: the process is up and able to respond.
pub async fn liveness_handler() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
        .into_response()
}

/// Readiness: the store must be writable before traffic is routed here.
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> Response {
    let components = vec![check_store(&state)];
    let status = overall(&components);
    (
        status.status_code(),
        Json(HealthReport { status, components }),
    )
        .into_response()
}

/// Per-component breakdown for operators.
pub async fn components_handler(State(state): State<Arc<AppState>>) -> Response {
    let components = vec![check_store(&state), check_engine(&state)];
    let status = overall(&components);
    (
        status.status_code(),
        Json(HealthReport { status, components }),
    )
        .into_response()
}
