use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;

use super::KeyValueStore;
use crate::common::DatabaseResult;
use crate::redis::{RedisConfig, check_health, connect, connect_from_config_with_retry};

/// Redis-backed store: one Redis string per key, written with `SET`
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Connect with the retry policy from `config`.
    pub async fn connect(config: &RedisConfig) -> DatabaseResult<Self> {
        let manager = connect_from_config_with_retry(config).await?;
        Ok(Self::new(manager))
    }

    /// Connect once, without retries.
    pub async fn connect_url(url: &str) -> DatabaseResult<Self> {
        let manager = connect(url).await?;
        Ok(Self::new(manager))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> DatabaseResult<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        debug!(key, found = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> DatabaseResult<()> {
        let mut conn = self.manager.clone();
        let len = value.len();
        conn.set::<_, _, ()>(key, value).await?;
        debug!(key, bytes = len, "Redis SET");
        Ok(())
    }

    async fn ping(&self) -> DatabaseResult<()> {
        let mut conn = self.manager.clone();
        check_health(&mut conn).await
    }
}
