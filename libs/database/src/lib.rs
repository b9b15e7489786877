//! Backing-store library: the whole-value key/value contract and its implementations
//!
//! # Features
//!
//! - `redis` (default) - Redis connector, health check, and [`kv::RedisStore`]
//! - `config` - `core_config::FromEnv` support for [`redis::RedisConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::kv::{InMemoryStore, KeyValueStore};
//!
//! let store = InMemoryStore::new();
//! store.put("todos", b"[]".to_vec()).await?;
//! assert_eq!(store.get("todos").await?, Some(b"[]".to_vec()));
//! ```

pub mod common;
pub mod kv;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult};
pub use kv::{InMemoryStore, KeyValueStore};

#[cfg(feature = "redis")]
pub use kv::RedisStore;
