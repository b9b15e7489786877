use async_trait::async_trait;
use database::KeyValueStore;
use strum::{Display, EnumString};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error};
use validator::Validate;

use crate::codec;
use crate::error::{TodoError, TodoResult};
use crate::models::{CreateTodo, Todo, UpdateTodo};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Longest prefix of a corrupt blob written to the error log
const CORRUPT_PREFIX_LEN: usize = 128;

/// Repository trait for the todo collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos in insertion order
    async fn list(&self) -> TodoResult<Vec<Todo>>;

    /// Append a new todo
    async fn create(&self, input: CreateTodo) -> TodoResult<Todo>;

    /// Merge `input` into the todo with `id`
    async fn update(&self, id: &str, input: UpdateTodo) -> TodoResult<Todo>;

    /// Remove the todo with `id`
    async fn remove(&self, id: &str) -> TodoResult<()>;
}

/// How mutations coordinate within one process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ConsistencyMode {
    /// Mutations hold a lock across load and save
    #[default]
    Serialized,
    /// No lock; overlapping mutations can lose an update
    LastWriteWins,
}

/// [`TodoRepository`] over a single JSON array stored under one key.
///
/// Every mutation is a read-modify-write of the whole collection. With
/// [`ConsistencyMode::Serialized`] the load/save pair runs under a mutex, so
/// concurrent mutations through the same repository never lose updates.
/// Separate processes sharing the store are still last-write-wins.
pub struct CollectionRepository<S> {
    store: S,
    key: String,
    mode: ConsistencyMode,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> CollectionRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            mode: ConsistencyMode::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_consistency(mut self, mode: ConsistencyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn consistency(&self) -> ConsistencyMode {
        self.mode
    }

    /// Read and decode the whole collection.
    pub async fn load(&self) -> TodoResult<Vec<Todo>> {
        let raw = self.store.get(&self.key).await?;

        codec::decode(&self.key, raw.as_deref()).inspect_err(|e| {
            if let (TodoError::CorruptCollection { reason, .. }, Some(bytes)) = (e, raw.as_deref()) {
                let prefix = &bytes[..bytes.len().min(CORRUPT_PREFIX_LEN)];
                error!(
                    key = %self.key,
                    blob_len = bytes.len(),
                    blob_prefix = %String::from_utf8_lossy(prefix),
                    %reason,
                    "Stored collection could not be decoded"
                );
            }
        })
    }

    /// Encode and write the whole collection.
    pub async fn save(&self, todos: &[Todo]) -> TodoResult<()> {
        let bytes = codec::encode(todos)?;
        debug!(key = %self.key, count = todos.len(), bytes = bytes.len(), "Saving collection");
        self.store.put(&self.key, bytes).await?;
        Ok(())
    }

    async fn lock(&self) -> Option<MutexGuard<'_, ()>> {
        match self.mode {
            ConsistencyMode::Serialized => Some(self.write_lock.lock().await),
            ConsistencyMode::LastWriteWins => None,
        }
    }
}

#[async_trait]
impl<S: KeyValueStore> TodoRepository for CollectionRepository<S> {
    async fn list(&self) -> TodoResult<Vec<Todo>> {
        self.load().await
    }

    async fn create(&self, input: CreateTodo) -> TodoResult<Todo> {
        input.validate()?;

        let _guard = self.lock().await;
        let mut todos = self.load().await?;

        let mut todo = codec::new_record(input.title, input.description.unwrap_or_default());
        while todos.iter().any(|t| t.id == todo.id) {
            debug!(id = %todo.id, "Generated id already in use, regenerating");
            todo.id = codec::new_id();
        }

        todos.push(todo.clone());
        self.save(&todos).await?;
        Ok(todo)
    }

    async fn update(&self, id: &str, input: UpdateTodo) -> TodoResult<Todo> {
        input.validate()?;

        let _guard = self.lock().await;
        let mut todos = self.load().await?;

        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        todo.apply_update(input);
        let updated = todo.clone();

        self.save(&todos).await?;
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> TodoResult<()> {
        let _guard = self.lock().await;
        let mut todos = self.load().await?;

        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Err(TodoError::NotFound(id.to_string()));
        }

        self.save(&todos).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{DatabaseError, DatabaseResult, InMemoryStore};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Barrier;

    /// Wraps a store, counting writes and optionally pausing reads.
    #[derive(Clone, Default)]
    struct ProbeStore {
        inner: InMemoryStore,
        puts: Arc<AtomicUsize>,
        gets: Arc<AtomicUsize>,
        /// First `n` reads wait here until all of them have read
        gate: Option<(Arc<Barrier>, usize)>,
        /// Yield to the scheduler after every read
        yield_after_get: bool,
    }

    impl ProbeStore {
        fn gated(reads: usize) -> Self {
            Self {
                gate: Some((Arc::new(Barrier::new(reads)), reads)),
                ..Default::default()
            }
        }

        fn yielding() -> Self {
            Self {
                yield_after_get: true,
                ..Default::default()
            }
        }

        fn puts(&self) -> usize {
            self.puts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl KeyValueStore for ProbeStore {
        async fn get(&self, key: &str) -> DatabaseResult<Option<Vec<u8>>> {
            let value = self.inner.get(key).await?;
            let n = self.gets.fetch_add(1, Ordering::SeqCst);
            if let Some((barrier, reads)) = &self.gate {
                if n < *reads {
                    barrier.wait().await;
                }
            }
            if self.yield_after_get {
                tokio::task::yield_now().await;
            }
            Ok(value)
        }

        async fn put(&self, key: &str, value: Vec<u8>) -> DatabaseResult<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.inner.put(key, value).await
        }

        async fn ping(&self) -> DatabaseResult<()> {
            Ok(())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> DatabaseResult<Option<Vec<u8>>> {
            Err(DatabaseError::Unavailable("connection refused".to_string()))
        }

        async fn put(&self, _key: &str, _value: Vec<u8>) -> DatabaseResult<()> {
            Err(DatabaseError::Unavailable("connection refused".to_string()))
        }

        async fn ping(&self) -> DatabaseResult<()> {
            Err(DatabaseError::Unavailable("connection refused".to_string()))
        }
    }

    async fn stored(store: &InMemoryStore, key: &str) -> Vec<Todo> {
        let raw = store.get(key).await.unwrap();
        codec::decode(key, raw.as_deref()).unwrap()
    }

    #[tokio::test]
    async fn test_list_on_empty_store() {
        let repo = CollectionRepository::new(InMemoryStore::new());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let repo = CollectionRepository::new(InMemoryStore::new());

        let todo = repo.create(CreateTodo::new("Buy milk")).await.unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "");
        assert!(!todo.completed);

        let todos = repo.list().await.unwrap();
        assert_eq!(todos, vec![todo.clone()]);

        let updated = repo.update(&todo.id, UpdateTodo::completed(true)).await.unwrap();
        assert!(updated.completed);

        repo.remove(&todo.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_appends_in_order_with_distinct_ids() {
        let repo = CollectionRepository::new(InMemoryStore::new());

        let mut created = Vec::new();
        for i in 0..10 {
            created.push(repo.create(CreateTodo::new(format!("todo {}", i))).await.unwrap());
        }

        let todos = repo.list().await.unwrap();
        assert_eq!(todos, created);

        let mut ids: Vec<_> = todos.iter().map(|t| t.id.clone()).collect();
        assert!(ids.iter().all(|id| !id.is_empty()));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test]
    async fn test_create_with_empty_title_never_writes() {
        let store = ProbeStore::default();
        let repo = CollectionRepository::new(store.clone());

        let err = repo
            .create(CreateTodo::new("").with_description("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Validation(msg) if msg.contains("Title is required")));
        assert_eq!(store.puts(), 0);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_completed_changes_only_completed_and_updated_at() {
        let repo = CollectionRepository::new(InMemoryStore::new());
        let before = repo
            .create(CreateTodo::new("Buy milk").with_description("semi-skimmed"))
            .await
            .unwrap();

        let after = repo.update(&before.id, UpdateTodo::completed(true)).await.unwrap();

        assert!(after.completed);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_title() {
        let store = ProbeStore::default();
        let repo = CollectionRepository::new(store.clone());
        let todo = repo.create(CreateTodo::new("Buy milk")).await.unwrap();

        let input = UpdateTodo {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(&todo.id, input).await,
            Err(TodoError::Validation(_))
        ));
        assert_eq!(store.puts(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = CollectionRepository::new(InMemoryStore::new());
        repo.create(CreateTodo::new("Buy milk")).await.unwrap();

        let err = repo
            .update("nonexistent-id", UpdateTodo::completed(true))
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::NotFound(id) if id == "nonexistent-id"));
    }

    #[tokio::test]
    async fn test_remove_twice_is_not_found() {
        let store = ProbeStore::default();
        let repo = CollectionRepository::new(store.clone());
        let keep = repo.create(CreateTodo::new("Keep")).await.unwrap();
        let gone = repo.create(CreateTodo::new("Gone")).await.unwrap();

        repo.remove(&gone.id).await.unwrap();
        assert!(matches!(repo.remove(&gone.id).await, Err(TodoError::NotFound(_))));

        assert_eq!(store.puts(), 3);
        assert_eq!(repo.list().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_corrupt_blob_surfaces_as_error() {
        let repo = CollectionRepository::new(InMemoryStore::with_value("todos", "{{ not json"));

        assert!(matches!(
            repo.list().await,
            Err(TodoError::CorruptCollection { key, .. }) if key == "todos"
        ));
        assert!(matches!(
            repo.create(CreateTodo::new("Buy milk")).await,
            Err(TodoError::CorruptCollection { .. })
        ));
    }

    #[tokio::test]
    async fn test_custom_key_is_used() {
        let store = InMemoryStore::new();
        let repo = CollectionRepository::new(store.clone()).with_key("todos-test");
        assert_eq!(repo.key(), "todos-test");

        let todo = repo.create(CreateTodo::new("Buy milk")).await.unwrap();

        assert_eq!(stored(&store, "todos-test").await, vec![todo]);
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_failure_is_backing_store_error() {
        let repo = CollectionRepository::new(BrokenStore);

        assert!(matches!(repo.list().await, Err(TodoError::BackingStore(_))));
        assert!(matches!(
            repo.create(CreateTodo::new("Buy milk")).await,
            Err(TodoError::BackingStore(_))
        ));
        assert!(matches!(repo.remove("a").await, Err(TodoError::BackingStore(_))));
    }

    #[tokio::test]
    async fn test_serialized_concurrent_creates_keep_every_record() {
        let store = ProbeStore::yielding();
        let repo = Arc::new(CollectionRepository::new(store.clone()));
        assert_eq!(repo.consistency(), ConsistencyMode::Serialized);

        let creates = (0..20).map(|i| {
            let repo = repo.clone();
            async move { repo.create(CreateTodo::new(format!("todo {}", i))).await }
        });
        let results = futures::future::join_all(creates).await;
        assert!(results.iter().all(|r| r.is_ok()));

        assert_eq!(stored(&store.inner, DEFAULT_STORAGE_KEY).await.len(), 20);
    }

    #[tokio::test]
    async fn test_last_write_wins_overlapping_creates_lose_one() {
        let store = ProbeStore::gated(2);
        let repo = CollectionRepository::new(store.clone())
            .with_consistency(ConsistencyMode::LastWriteWins);

        let (a, b) = tokio::join!(
            repo.create(CreateTodo::new("first")),
            repo.create(CreateTodo::new("second"))
        );
        assert!(a.is_ok() && b.is_ok());

        assert_eq!(store.puts(), 2);
        assert_eq!(stored(&store.inner, DEFAULT_STORAGE_KEY).await.len(), 1);
    }

    #[test]
    fn test_consistency_mode_parsing() {
        assert_eq!(
            "serialized".parse::<ConsistencyMode>().unwrap(),
            ConsistencyMode::Serialized
        );
        assert_eq!(
            "last-write-wins".parse::<ConsistencyMode>().unwrap(),
            ConsistencyMode::LastWriteWins
        );
        assert!("eventual".parse::<ConsistencyMode>().is_err());
        assert_eq!(ConsistencyMode::LastWriteWins.to_string(), "last-write-wins");
    }
}
