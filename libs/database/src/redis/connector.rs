use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use super::RedisConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Connect to Redis and return a ConnectionManager
///
/// The ConnectionManager reconnects on its own after transient failures, so a
/// single manager can be cloned into every request.
pub async fn connect(url: &str) -> redis::RedisResult<ConnectionManager> {
    info!("Attempting to connect to Redis");

    let client = Client::open(url)?;
    let manager = ConnectionManager::new(client).await?;

    // Verify connection with PING
    let mut conn = manager.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    info!("Successfully connected to Redis");
    Ok(manager)
}

/// Connect using a RedisConfig, retrying `connect_retries` times with backoff
pub async fn connect_from_config_with_retry(
    config: &RedisConfig,
) -> redis::RedisResult<ConnectionManager> {
    let retry_config = RetryConfig::new().with_max_retries(config.connect_retries);
    retry_with_backoff(|| connect(&config.url), retry_config).await
}
