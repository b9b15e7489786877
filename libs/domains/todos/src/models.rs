use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Task record as stored in the collection and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Assigned at creation, never changes
    pub id: String,
    pub title: String,
    /// Missing in older blobs; decodes as empty
    #[serde(default)]
    pub description: String,
    /// Missing in older blobs; decodes as `false`
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Shallow-merge the provided fields and refresh `updated_at`.
    ///
    /// `id` and `created_at` are not part of [`UpdateTodo`] and stay untouched.
    pub fn apply_update(&mut self, input: UpdateTodo) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(completed) = input.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a todo
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTodo {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Defaults to an empty string
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// DTO for updating a todo; absent fields are left as they are
///
/// Fields other than these three (`id`, `createdAt`, anything unknown) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTodo {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// Update that only flips the completion flag
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }
}

/// Body returned after a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    pub id: String,
    pub message: String,
}

impl DeleteConfirmation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: "Todo deleted".to_string(),
        }
    }
}
