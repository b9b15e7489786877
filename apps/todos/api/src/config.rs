use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig};
use database::redis::RedisConfig;
use domain_todos::{ConsistencyMode, DEFAULT_STORAGE_KEY};
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Which backing store holds the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreKind {
    Memory,
    Redis,
}

#[derive(Clone, Debug)]
pub enum StoreConfig {
    /// Process-local map; contents are lost on restart
    Memory,
    Redis(RedisConfig),
}

impl StoreConfig {
    pub fn kind(&self) -> StoreKind {
        match self {
            StoreConfig::Memory => StoreKind::Memory,
            StoreConfig::Redis(_) => StoreKind::Redis,
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: StoreConfig,
    /// Key the whole collection is stored under
    pub storage_key: String,
    pub consistency: ConsistencyMode,
}

impl Config {
    /// Development defaults: in-memory store, default key, serialized mutations.
    pub fn new(server: ServerConfig) -> Self {
        Self {
            app: app_info!(),
            server,
            environment: Environment::Development,
            store: StoreConfig::Memory,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            consistency: ConsistencyMode::default(),
        }
    }

    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        let store = match env_parse::<StoreKind>("TODOS_STORE", "memory")? {
            StoreKind::Memory => StoreConfig::Memory,
            StoreKind::Redis => StoreConfig::Redis(RedisConfig::from_env()?), // REDIS_URL required
        };

        let storage_key = env_or_default("TODOS_STORAGE_KEY", DEFAULT_STORAGE_KEY)
            .trim()
            .to_string();
        if storage_key.is_empty() {
            return Err(ConfigError::ParseError {
                key: "TODOS_STORAGE_KEY".to_string(),
                details: "must not be empty".to_string(),
            }
            .into());
        }

        let consistency = env_parse::<ConsistencyMode>("TODOS_CONSISTENCY", "serialized")?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            store,
            storage_key,
            consistency,
        })
    }
}
