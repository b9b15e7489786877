//! Whole-value key/value stores
//!
//! The contract is deliberately small: `get` and `put` operate on entire values,
//! there is no partial update and no transaction. Callers that need to change a
//! value must read it, compute the new value, and write it back.

mod memory;
#[cfg(feature = "redis")]
mod redis;

use async_trait::async_trait;
use std::sync::Arc;

use crate::common::DatabaseResult;

pub use memory::InMemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;

/// A key/value backing store holding opaque byte values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` when the key is absent.
    async fn get(&self, key: &str) -> DatabaseResult<Option<Vec<u8>>>;

    /// Replace the value stored under `key`.
    async fn put(&self, key: &str, value: Vec<u8>) -> DatabaseResult<()>;

    /// Verify the store is reachable.
    async fn ping(&self) -> DatabaseResult<()>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> DatabaseResult<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> DatabaseResult<()> {
        (**self).put(key, value).await
    }

    async fn ping(&self) -> DatabaseResult<()> {
        (**self).ping().await
    }
}
