use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Origins allowed to call the API
pub const ALLOW_ORIGIN: &str = "*";
/// Methods advertised to browsers
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
/// Request headers browsers may send
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Middleware that makes every response cross-origin readable.
///
/// - Any `OPTIONS` request is answered directly with `204 No Content` and an
///   empty body; it never reaches a handler or the fallback.
/// - Every other response, including errors and 404s, gets the same
///   `Access-Control-Allow-*` headers.
///
/// Unlike `tower_http::cors::CorsLayer`, the allow-methods and allow-headers
/// values are sent on all responses, not only on pre-flight ones, and an
/// `OPTIONS` request without `Origin` is still treated as a pre-flight.
///
/// ```ignore
/// let app = Router::new()
///     .route("/todos", get(list))
///     .layer(axum::middleware::from_fn(permissive_cors));
/// ```
pub async fn permissive_cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        tracing::trace!(path = %request.uri().path(), "Answering pre-flight request");
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}
