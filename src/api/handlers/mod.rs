//! HTTP handlers and shared response types.

mod tasks;

#[cfg(test)]
mod tasks_test;

pub use tasks::*;

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::error::GraphError;

/// JSON error body: `{"error": ..., "details": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// 400 body for task creation with absent required fields.
#[derive(Debug, Serialize)]
pub struct MissingFieldsResponse {
    pub error: String,
    pub required: Vec<&'static str>,
}

/// Map an upstream Graph failure onto an HTTP response.
///
/// Failures are terminal for the operation: no retry, just a status and a
/// human-readable body.
pub(crate) fn map_graph_error(error: GraphError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message, details) = match error {
        GraphError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            "Unauthorized - Graph rejected the access token".to_string(),
            None,
        ),
        GraphError::NotFound { resource } => {
            (StatusCode::NOT_FOUND, "Not found".to_string(), Some(resource))
        }
        GraphError::BadRequest { message } => {
            (StatusCode::BAD_REQUEST, "Bad request".to_string(), Some(message))
        }
        GraphError::Api { status, message } => (
            StatusCode::BAD_GATEWAY,
            "Graph API error".to_string(),
            Some(format!("{status}: {message}")),
        ),
        GraphError::Http(e) => (
            StatusCode::BAD_GATEWAY,
            "Graph request failed".to_string(),
            Some(e.to_string()),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error".to_string(),
            Some(other.to_string()),
        ),
    };

    (
        status,
        Json(ErrorResponse {
            error: message,
            details,
        }),
    )
}

/// JSON 404 for any path outside the API surface.
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
            details: None,
        }),
    )
}
