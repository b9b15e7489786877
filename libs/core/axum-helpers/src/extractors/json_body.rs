//! JSON body extractor whose rejections render as [`AppError`].

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// JSON extractor that turns every parse failure into a `400 Bad Request`.
///
/// Axum's own `Json` answers with 415 or 422 for some failures and a plain-text
/// body; this wrapper keeps the status at 400 (413 for oversized bodies) and
/// uses the standard [`ErrorResponse`](crate::errors::ErrorResponse) body.
///
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<CreateTodo>) -> impl IntoResponse {
///     /* ... */
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
