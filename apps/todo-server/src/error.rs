//! Server error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use todo_store::TodoStoreError;

/// Message returned for unknown or unparsable todo ids.
pub const TODO_NOT_FOUND: &str = "To-Do item not found";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request body.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store error.
    #[error("Database error: {0}")]
    Database(#[from] TodoStoreError),
}

impl ServerError {
    /// Creates the error for a todo id that does not exist.
    pub fn todo_not_found() -> Self {
        Self::NotFound(TODO_NOT_FOUND.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Database(TodoStoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ServerError::Database(TodoStoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, TODO_NOT_FOUND.to_string())
            }
            ServerError::Database(e @ TodoStoreError::Database(_)) => {
                tracing::error!(error = %e, "Store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
