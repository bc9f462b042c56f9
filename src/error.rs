//! Error taxonomy for the essay metrics service.
//!
//! Two kinds of failure cross the HTTP boundary: rejected input (blank essay
//! text, malformed body) and storage trouble. Aggregation over zero records
//! is deliberately not represented here; absent averages are a normal result.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before analysis ran.
    #[error("{0}")]
    Validation(String),

    /// The record store could not complete an append or read.
    /// Source and display delegate to the underlying error.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn no_text() -> Self {
        ApiError::Validation("no text provided".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable category label used for request metrics.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

/// Wire shape clients key on: a single `error` string.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Validation(message) => {
                tracing::debug!(category = self.category(), %message, "request rejected");
            }
            ApiError::Storage(source) => {
                tracing::error!(category = self.category(), error = %source, "request failed");
            }
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
