//! Error types for the quota gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use openai_client::OpenAiError;
use serde::Serialize;
use thiserror::Error;
use usage_store::StoreError;

/// Gateway error types.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] OpenAiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            // Mirror the provider's failure status to the caller
            GatewayError::Upstream(OpenAiError::Api { status, .. }) => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "UPSTREAM_ERROR",
            ),
            GatewayError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            GatewayError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
