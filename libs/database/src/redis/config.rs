#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse};

/// Redis connection settings
///
/// ```ignore
/// use database::redis::RedisConfig;
///
/// let config = RedisConfig::new("redis://127.0.0.1:6379").with_connect_retries(5);
/// let store = database::kv::RedisStore::connect(&config).await?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedisConfig {
    /// Redis connection URL, credentials and database number included
    pub url: String,

    /// How many times to retry the initial connection before giving up
    pub connect_retries: u32,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_retries: 3,
        }
    }

    pub fn with_connect_retries(mut self, connect_retries: u32) -> Self {
        self.connect_retries = connect_retries;
        self
    }

    /// Get a reference to the Redis URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new("redis://127.0.0.1:6379")
    }
}

/// Environment variables:
/// - `REDIS_URL` or `REDIS_HOST` (required)
/// - `REDIS_CONNECT_RETRIES` (optional, default 3)
#[cfg(feature = "config")]
impl FromEnv for RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("REDIS_URL")
            .or_else(|_| std::env::var("REDIS_HOST"))
            .map_err(|_| ConfigError::MissingEnvVar("REDIS_URL or REDIS_HOST".to_string()))?;
        let connect_retries = env_parse("REDIS_CONNECT_RETRIES", "3")?;

        Ok(Self {
            url,
            connect_retries,
        })
    }
}
