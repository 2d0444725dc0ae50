//! Todo store error types.

use thiserror::Error;

/// Message reported when a todo is created without task text.
pub const TASK_REQUIRED: &str = "Task is required";

/// Errors that can occur during todo store operations.
#[derive(Debug, Error)]
pub enum TodoStoreError {
    /// No todo with the given id.
    #[error("Todo not found: {id}")]
    NotFound { id: i64 },

    /// The payload failed a presence check.
    #[error("{0}")]
    Validation(String),

    /// Database error. Displays the driver message as-is.
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl TodoStoreError {
    /// Creates a not found error.
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for todo store operations.
pub type TodoStoreResult<T> = Result<T, TodoStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(TodoStoreError::not_found(4).to_string(), "Todo not found: 4");
        assert_eq!(
            TodoStoreError::validation(TASK_REQUIRED).to_string(),
            "Task is required"
        );
        assert_eq!(
            TodoStoreError::Database(sqlx::Error::RowNotFound).to_string(),
            sqlx::Error::RowNotFound.to_string()
        );
    }
}
