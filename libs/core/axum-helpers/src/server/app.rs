use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::{permissive_cors, security_headers};
use axum::{Json, Router, extract::DefaultBodyLimit, middleware, routing::get};
use core_config::server::ServerConfig;
use std::io;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if the listener cannot bind to the configured address or
/// the server fails while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Combines API routes and operational routes with the cross-cutting layers.
///
/// - `apis` are nested under `/api`
/// - `operational` (health, readiness) is merged at the root
/// - the OpenAPI document for `T` is served at `/api-docs/openapi.json`
/// - unknown paths and unsupported methods both render the JSON 404
/// - request bodies are capped at `server_config.max_body_bytes`
///
/// CORS is the outermost layer so that pre-flight requests short-circuit and
/// every response, including 404s and errors, carries the CORS headers.
///
/// ```ignore
/// let router = create_router::<ApiDoc>(domain_todos::router(repo), health_router(app_info!()), &config.server);
/// create_app(router, &config.server).await?;
/// ```
pub fn create_router<T>(apis: Router, operational: Router, server_config: &ServerConfig) -> Router
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();

    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi) }
            }),
        )
        .nest("/api", apis)
        .merge(operational)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(DefaultBodyLimit::max(server_config.max_body_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(permissive_cors))
}
