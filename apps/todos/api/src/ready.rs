use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

use crate::SharedStore;

/// `GET /ready`: 200 when the backing store answers a ping, 503 otherwise.
pub fn ready_router(store: SharedStore) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(store)
}

async fn ready_handler(State(store): State<SharedStore>) -> Response {
    let store_check: HealthCheckFuture<'_> =
        Box::pin(async { store.ping().await.map_err(|e| e.to_string()) });

    run_health_checks(vec![("store", store_check)]).await
}
