//! Conversion between the stored blob and the ordered collection of todos.
//!
//! The collection is a single JSON array. An absent or zero-length blob is an
//! empty collection; anything else must parse, or decoding fails.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{TodoError, TodoResult};
use crate::models::Todo;

/// Parse the blob stored under `key`.
pub fn decode(key: &str, raw: Option<&[u8]>) -> TodoResult<Vec<Todo>> {
    match raw {
        None => Ok(Vec::new()),
        Some(bytes) if bytes.is_empty() => Ok(Vec::new()),
        Some(bytes) => serde_json::from_slice(bytes).map_err(|e| TodoError::CorruptCollection {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Serialize the collection, preserving order.
pub fn encode(todos: &[Todo]) -> TodoResult<Vec<u8>> {
    serde_json::to_vec(todos)
        .map_err(|e| TodoError::Internal(format!("failed to encode collection: {}", e)))
}

/// Fresh identifier: a hyphenated UUID v7.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// A new, not yet completed record stamped with the current time.
pub fn new_record(title: String, description: String) -> Todo {
    let now = Utc::now();
    Todo {
        id: new_id(),
        title,
        description,
        completed: false,
        created_at: now,
        updated_at: now,
    }
}
