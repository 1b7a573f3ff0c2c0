//! HTTP-level tests for the user registration API
//!
//! These tests run the real router against the in-memory backend and verify
//! status codes, the response envelope, and the Location header - the full
//! handler -> service -> repository path without a database.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

use registration_api::api::state::AppState;
use registration_api::api::create_router_with_state;
use registration_api::infrastructure::user::{InMemoryUserRepository, Sha256Hasher, UserService};

fn test_app() -> Router {
    let service = UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Sha256Hasher::new()),
    );

    create_router_with_state(AppState::new(Arc::new(service)))
}

async fn envelope(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request_with_body(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn request_without_body(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn jane() -> Value {
    json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+15551234567",
        "password": "secret1"
    })
}

async fn create_user(app: &Router, body: &Value) -> Response {
    app.clone()
        .oneshot(request_with_body("POST", "/api/users", body))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_user_returns_201_with_location() {
    let app = test_app();

    let response = create_user(&app, &jane()).await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let body = envelope(response).await;
    assert_eq!(body["success"], true);

    let id = body["data"].as_i64().unwrap();
    assert_eq!(location, format!("/api/users/{}", id));
}

#[tokio::test]
async fn test_create_user_rejects_short_password() {
    let app = test_app();

    let mut body = jane();
    body["password"] = "12345".into();

    let response = create_user(&app, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = envelope(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Password must be 6-100 characters");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_create_user_rejects_whitespace_only_name() {
    let app = test_app();

    // Two spaces satisfy the length constraint but fail the service's
    // emptiness check
    let mut body = jane();
    body["fullName"] = "  ".into();

    let response = create_user(&app, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(envelope(response).await["message"], "All fields are required");
}

#[tokio::test]
async fn test_create_user_rejects_duplicate_email() {
    let app = test_app();
    create_user(&app, &jane()).await;

    let mut body = jane();
    body["fullName"] = "Another Jane".into();

    let response = create_user(&app, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(envelope(response).await["message"], "Email already exists");
}

#[tokio::test]
async fn test_create_user_rejects_malformed_json() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(envelope(response).await["success"], false);
}

#[tokio::test]
async fn test_list_users_on_empty_store() {
    let app = test_app();

    let response = app
        .oneshot(request_without_body("GET", "/api/users"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = envelope(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let app = test_app();

    let created = envelope(create_user(&app, &jane()).await).await;
    let id = created["data"].as_i64().unwrap();

    let response = app
        .oneshot(request_without_body("GET", &format!("/api/users/{}", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = envelope(response).await;
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["id"].as_i64().unwrap(), id);
    assert_eq!(data["fullName"], "Jane Doe");
    assert_eq!(data["email"], "jane@example.com");
    assert_eq!(data["phone"], "+15551234567");
    assert!(data["createdAt"].is_string());
    assert!(data.get("password").is_none());
    assert!(data.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let app = test_app();

    let response = app
        .oneshot(request_without_body("GET", "/api/users/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(envelope(response).await["message"], "User not found");
}

#[tokio::test]
async fn test_update_user_without_password() {
    let app = test_app();

    let created = envelope(create_user(&app, &jane()).await).await;
    let id = created["data"].as_i64().unwrap();

    let update = json!({
        "fullName": "Jane A. Doe",
        "email": "jane@example.com",
        "phone": "+15551234567"
    });

    let response = app
        .clone()
        .oneshot(request_with_body(
            "PUT",
            &format!("/api/users/{}", id),
            &update,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(envelope(response).await["success"], true);

    let fetched = app
        .oneshot(request_without_body("GET", &format!("/api/users/{}", id)))
        .await
        .unwrap();

    assert_eq!(
        envelope(fetched).await["data"]["fullName"],
        "Jane A. Doe"
    );
}

#[tokio::test]
async fn test_update_missing_user_returns_404() {
    let app = test_app();

    let update = json!({
        "fullName": "Jane A. Doe",
        "email": "jane@example.com",
        "phone": "+15551234567"
    });

    let response = app
        .oneshot(request_with_body("PUT", "/api/users/42", &update))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        envelope(response).await["message"],
        "User with ID 42 not found"
    );
}

#[tokio::test]
async fn test_update_user_rejects_invalid_email() {
    let app = test_app();

    let created = envelope(create_user(&app, &jane()).await).await;
    let id = created["data"].as_i64().unwrap();

    let update = json!({
        "fullName": "Jane A. Doe",
        "email": "not-an-email",
        "phone": "+15551234567"
    });

    let response = app
        .oneshot(request_with_body(
            "PUT",
            &format!("/api/users/{}", id),
            &update,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_then_fetch_returns_404() {
    let app = test_app();

    let created = envelope(create_user(&app, &jane()).await).await;
    let id = created["data"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request_without_body("DELETE", &format!("/api/users/{}", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(envelope(response).await["success"], true);

    let fetched = app
        .oneshot(request_without_body("GET", &format!("/api/users/{}", id)))
        .await
        .unwrap();

    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_user_returns_404() {
    let app = test_app();

    let response = app
        .oneshot(request_without_body("DELETE", "/api/users/7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        envelope(response).await["message"],
        "User with ID 7 not found"
    );
}

#[tokio::test]
async fn test_list_users_preserves_store_order() {
    let app = test_app();
    create_user(&app, &jane()).await;

    let bob = json!({
        "fullName": "Bob Roe",
        "email": "bob@example.com",
        "phone": "+15550000001",
        "password": "secret2"
    });
    create_user(&app, &bob).await;

    let response = app
        .oneshot(request_without_body("GET", "/api/users"))
        .await
        .unwrap();

    let body = envelope(response).await;
    let users = body["data"].as_array().unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["fullName"], "Jane Doe");
    assert_eq!(users[1]["fullName"], "Bob Roe");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app();

    let health = app
        .clone()
        .oneshot(request_without_body("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let ready = app
        .clone()
        .oneshot(request_without_body("GET", "/ready"))
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);

    let live = app
        .oneshot(request_without_body("GET", "/live"))
        .await
        .unwrap();
    assert_eq!(live.status(), StatusCode::OK);
}
