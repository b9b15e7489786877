use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::common::DatabaseResult;

/// In-memory store for development and tests
///
/// Clones share the same map, so a test can hand one clone to a repository and
/// inspect the raw values through another.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    values: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a single value.
    pub fn with_value(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> DatabaseResult<Option<Vec<u8>>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> DatabaseResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn ping(&self) -> DatabaseResult<()> {
        Ok(())
    }
}
