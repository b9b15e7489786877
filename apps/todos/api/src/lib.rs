//! Todos API: configuration, backing store selection, and route composition.
//!
//! `main` only loads [`config::Config`], connects the store, and serves the
//! router built here, so tests can drive the exact same router in-process.

pub mod config;
pub mod ready;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use database::{DatabaseResult, InMemoryStore, KeyValueStore, RedisStore};
use domain_todos::{ApiDoc, CollectionRepository, handlers};
use std::sync::Arc;
use tracing::info;

use config::{Config, StoreConfig};

/// Shared handle to whichever store was configured
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Open the configured backing store. Redis connections are retried.
pub async fn connect_store(store: &StoreConfig) -> DatabaseResult<SharedStore> {
    match store {
        StoreConfig::Memory => {
            info!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreConfig::Redis(redis) => {
            info!("Connecting to Redis");
            let store = RedisStore::connect(redis).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Full application router: `/api/todos`, `/health`, `/ready`, and the OpenAPI document.
pub fn build_router(config: &Config, store: SharedStore) -> Router {
    let repository = CollectionRepository::new(store.clone())
        .with_key(config.storage_key.clone())
        .with_consistency(config.consistency);

    let operational = health_router(config.app).merge(ready::ready_router(store));

    create_router::<ApiDoc>(handlers::router(repository), operational, &config.server)
}
