//! Todos Domain
//!
//! A collection of todos persisted as one JSON document under a single key of
//! a [`database::KeyValueStore`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Validation, read-modify-write of the collection
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Codec    │  ← Blob <-> ordered Vec<Todo>, ids and timestamps
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Todo and its DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::InMemoryStore;
//! use domain_todos::{handlers, CollectionRepository, ConsistencyMode};
//!
//! let repository = CollectionRepository::new(InMemoryStore::new())
//!     .with_key("todos")
//!     .with_consistency(ConsistencyMode::Serialized);
//!
//! let router = handlers::router(repository);
//! ```

pub mod codec;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

pub use error::{TodoError, TodoResult};
pub use handlers::ApiDoc;
pub use models::{CreateTodo, DeleteConfirmation, Todo, UpdateTodo};
pub use repository::{
    CollectionRepository, ConsistencyMode, DEFAULT_STORAGE_KEY, TodoRepository,
};
