//! Handler tests for the Todos domain
//!
//! These drive `handlers::router` directly over an in-memory store:
//! - Request deserialization and validation
//! - Response bodies and HTTP status codes
//! - The stored collection after each call
//!
//! Cross-origin headers and the `/api` mount point belong to the application
//! and are covered by its own tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use database::{InMemoryStore, KeyValueStore};
use domain_todos::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(store: &InMemoryStore) -> axum::Router {
    handlers::router(CollectionRepository::new(store.clone()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(store: &InMemoryStore, title: &str) -> Todo {
    let response = app(store)
        .oneshot(json_request("POST", "/todos", json!({ "title": title })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn stored(store: &InMemoryStore) -> Vec<Todo> {
    let raw = store.get(DEFAULT_STORAGE_KEY).await.unwrap();
    codec::decode(DEFAULT_STORAGE_KEY, raw.as_deref()).unwrap()
}

#[tokio::test]
async fn test_list_empty_collection_returns_empty_array() {
    let store = InMemoryStore::new();

    let response = app(&store).oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let todos: Vec<Todo> = json_body(response).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn test_create_todo_handler_returns_201() {
    let store = InMemoryStore::new();
    let builder = TestDataBuilder::from_test_name("handler_create_201");

    let response = app(&store)
        .oneshot(json_request(
            "POST",
            "/todos",
            json!({ "title": builder.title("milk"), "description": "2 litres" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response).await;
    assert_eq!(body["title"], builder.title("milk"));
    assert_eq!(body["description"], "2 litres");
    assert_eq!(body["completed"], false);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["createdAt"], body["updatedAt"]);

    assert_eq!(stored(&store).await.len(), 1);
}

#[tokio::test]
async fn test_create_without_description_defaults_to_empty() {
    let store = InMemoryStore::new();

    let todo = create(&store, "Buy milk").await;

    assert_eq!(todo.description, "");
    assert!(!todo.completed);
}

#[tokio::test]
async fn test_create_todo_handler_validates_title() {
    let store = InMemoryStore::new();

    for body in [json!({ "title": "" }), json!({ "description": "x" })] {
        let response = app(&store)
            .oneshot(json_request("POST", "/todos", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = json_body(response).await;
        assert_eq!(error["error"], "VALIDATION_ERROR");
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_json_is_400_and_store_untouched() {
    let store = InMemoryStore::new();

    let request = Request::builder()
        .method("POST")
        .uri("/todos")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(&store).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_wrong_field_type_is_400() {
    let store = InMemoryStore::new();
    let todo = create(&store, "Buy milk").await;

    let response = app(&store)
        .oneshot(json_request(
            "PUT",
            &format!("/todos/{}", todo.id),
            json!({ "completed": "yes" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored(&store).await, vec![todo]);
}

#[tokio::test]
async fn test_update_merges_fields_and_ignores_immutable_ones() {
    let store = InMemoryStore::new();
    let todo = create(&store, "Buy milk").await;

    let response = app(&store)
        .oneshot(json_request(
            "PUT",
            &format!("/todos/{}", todo.id),
            json!({
                "completed": true,
                "id": "replaced",
                "createdAt": "1999-01-01T00:00:00Z"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let updated: Todo = json_body(response).await;
    assert_eq!(updated.id, todo.id);
    assert_eq!(updated.title, "Buy milk");
    assert!(updated.completed);
    assert_eq!(updated.created_at, todo.created_at);
    assert!(updated.updated_at >= todo.updated_at);

    assert_eq!(stored(&store).await, vec![updated]);
}

#[tokio::test]
async fn test_update_with_empty_title_is_400() {
    let store = InMemoryStore::new();
    let todo = create(&store, "Buy milk").await;

    let response = app(&store)
        .oneshot(json_request(
            "PUT",
            &format!("/todos/{}", todo.id),
            json!({ "title": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored(&store).await, vec![todo]);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let store = InMemoryStore::new();
    create(&store, "Buy milk").await;

    let response = app(&store)
        .oneshot(json_request(
            "PUT",
            "/todos/nonexistent-id",
            json!({ "completed": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: Value = json_body(response).await;
    assert_eq!(error["error"], "NOT_FOUND");
    assert_eq!(error["message"], "Todo nonexistent-id not found");
}

#[tokio::test]
async fn test_undecodable_id_is_json_400_and_store_untouched() {
    let store = InMemoryStore::new();
    let todo = create(&store, "Buy milk").await;

    let requests = [
        json_request("PUT", "/todos/%FF", json!({ "completed": true })),
        empty_request("DELETE", "/todos/%FF"),
    ];

    for request in requests {
        let response = app(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = json_body(response).await;
        assert_eq!(error["error"], "VALIDATION_ERROR");
    }

    assert_eq!(stored(&store).await, vec![todo]);
}

#[tokio::test]
async fn test_delete_returns_confirmation_then_404() {
    let store = InMemoryStore::new();
    let todo = create(&store, "Buy milk").await;
    let path = format!("/todos/{}", todo.id);

    let response = app(&store).oneshot(empty_request("DELETE", &path)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation: DeleteConfirmation = json_body(response).await;
    assert_eq!(confirmation, DeleteConfirmation::new(todo.id.clone()));
    assert!(stored(&store).await.is_empty());

    let response = app(&store).oneshot(empty_request("DELETE", &path)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unrouted_method_on_known_path_is_404() {
    let store = InMemoryStore::new();

    for (method, uri) in [("PATCH", "/todos"), ("GET", "/todos/abc"), ("POST", "/todos/abc")] {
        let response = app(&store).oneshot(empty_request(method, uri)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::NOT_FOUND,
            "{} {} should be 404",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_corrupt_collection_is_500() {
    let store = InMemoryStore::with_value(DEFAULT_STORAGE_KEY, "<html>oops</html>");

    let response = app(&store).oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = json_body(response).await;
    assert_eq!(error["error"], "STORE_CORRUPTED");
}

#[tokio::test]
async fn test_todo_lifecycle_scenario() {
    let store = InMemoryStore::new();

    let todo = create(&store, "Buy milk").await;
    assert!(!todo.completed);

    let response = app(&store).oneshot(empty_request("GET", "/todos")).await.unwrap();
    let todos: Vec<Todo> = json_body(response).await;
    assert_eq!(todos, vec![todo.clone()]);

    let response = app(&store)
        .oneshot(json_request(
            "PUT",
            &format!("/todos/{}", todo.id),
            json!({ "completed": true }),
        ))
        .await
        .unwrap();
    let toggled: Todo = json_body(response).await;
    assert!(toggled.completed);

    let response = app(&store)
        .oneshot(empty_request("DELETE", &format!("/todos/{}", todo.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&store).oneshot(empty_request("GET", "/todos")).await.unwrap();
    let todos: Vec<Todo> = json_body(response).await;
    assert!(todos.is_empty());
}
