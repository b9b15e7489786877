use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Collection under key '{key}' could not be decoded: {reason}")]
    CorruptCollection { key: String, reason: String },

    #[error("Backing store error: {0}")]
    BackingStore(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TodoResult<T> = Result<T, TodoError>;

impl From<DatabaseError> for TodoError {
    fn from(err: DatabaseError) -> Self {
        TodoError::BackingStore(err.to_string())
    }
}

impl From<validator::ValidationErrors> for TodoError {
    fn from(err: validator::ValidationErrors) -> Self {
        TodoError::Validation(err.to_string())
    }
}

/// Convert TodoError to AppError for standardized error responses
impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(msg) => AppError::BadRequest(msg),
            TodoError::NotFound(id) => AppError::NotFound(format!("Todo {} not found", id)),
            TodoError::CorruptCollection { key, reason } => {
                AppError::StoreCorrupted(format!("key '{}': {}", key, reason))
            }
            TodoError::BackingStore(msg) => AppError::StoreUnavailable(msg),
            TodoError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
