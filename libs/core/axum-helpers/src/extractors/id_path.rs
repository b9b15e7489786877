//! Single string path parameter extractor whose rejections render as [`AppError`].

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for a single opaque id path parameter.
///
/// Any non-empty segment is accepted. A segment axum cannot decode (for
/// example invalid percent-encoded UTF-8) becomes a `400` with the standard
/// [`ErrorResponse`](crate::errors::ErrorResponse) body.
///
/// ```ignore
/// use axum_helpers::IdPath;
///
/// async fn delete(IdPath(id): IdPath) -> String {
///     format!("deleted {}", id)
/// }
///
/// let app = Router::new().route("/todos/{id}", delete(delete));
/// ```
pub struct IdPath(pub String);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(IdPath(id))
    }
}
