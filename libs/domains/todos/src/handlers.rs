use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    IdPath, JsonBody,
    errors::handlers::not_found,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

use crate::error::TodoResult;
use crate::models::{CreateTodo, DeleteConfirmation, Todo, UpdateTodo};
use crate::repository::TodoRepository;

const TAG: &str = "todos";

/// OpenAPI documentation for the Todos API
#[derive(OpenApi)]
#[openapi(
    paths(list_todos, create_todo, update_todo, delete_todo),
    components(
        schemas(Todo, CreateTodo, UpdateTodo, DeleteConfirmation),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Todo collection endpoints")
    )
)]
pub struct ApiDoc;

/// Create the todo router.
///
/// Paths are relative to the mount point (`/api` in the application). Methods
/// other than the routed ones fall through to the JSON 404.
pub fn router<R: TodoRepository + 'static>(repository: R) -> Router {
    let shared_repository = Arc::new(repository);

    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .method_not_allowed_fallback(not_found)
        .with_state(shared_repository)
}

/// List all todos in insertion order
#[utoipa::path(
    get,
    path = "/api/todos",
    tag = TAG,
    responses(
        (status = 200, description = "All todos", body = Vec<Todo>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_todos<R: TodoRepository>(
    State(repository): State<Arc<R>>,
) -> TodoResult<Json<Vec<Todo>>> {
    let todos = repository.list().await?;
    Ok(Json(todos))
}

/// Create a todo
#[utoipa::path(
    post,
    path = "/api/todos",
    tag = TAG,
    request_body = CreateTodo,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_todo<R: TodoRepository>(
    State(repository): State<Arc<R>>,
    JsonBody(input): JsonBody<CreateTodo>,
) -> TodoResult<impl IntoResponse> {
    let todo = repository.create(input).await?;
    info!(id = %todo.id, "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Update a todo; only the provided fields change
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Todo ID")
    ),
    request_body = UpdateTodo,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_todo<R: TodoRepository>(
    State(repository): State<Arc<R>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<UpdateTodo>,
) -> TodoResult<Json<Todo>> {
    let todo = repository.update(&id, input).await?;
    info!(id = %todo.id, completed = todo.completed, "Todo updated");
    Ok(Json(todo))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo deleted", body = DeleteConfirmation),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_todo<R: TodoRepository>(
    State(repository): State<Arc<R>>,
    IdPath(id): IdPath,
) -> TodoResult<Json<DeleteConfirmation>> {
    repository.remove(&id).await?;
    info!(id = %id, "Todo deleted");
    Ok(Json(DeleteConfirmation::new(id)))
}
