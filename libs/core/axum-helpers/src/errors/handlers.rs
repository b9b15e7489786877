use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Fallback for unknown paths and for known paths called with an unrouted method.
///
/// ```ignore
/// let app = Router::new()
///     .route("/todos", get(list))
///     .fallback(not_found)
///     .method_not_allowed_fallback(not_found);
/// ```
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}
