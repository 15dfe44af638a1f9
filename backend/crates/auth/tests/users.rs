//! `/users` CRUD through the router.

use auth::{AuthAppState, AuthConfig, MemoryAuthRepository, auth_router, users_router};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    let state = AuthAppState::new(MemoryAuthRepository::new(), AuthConfig::with_random_secret());
    auth_router(state.clone()).merge(users_router(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, username: &str, email: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            "/users",
            json!({ "username": username, "email": email, "password": "pw123" }),
        ),
    )
    .await
}

async fn first_user_id(app: &Router) -> String {
    let (_, users) = send(app, empty_request("GET", "/users")).await;
    users[0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_returns_201_with_token() {
    let app = app();
    let (status, body) = create(&app, "alice", "a@x.io").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["auth"], json!(true));
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn list_never_exposes_password_hash() {
    let app = app();
    create(&app, "alice", "a@x.io").await;
    create(&app, "bob", "b@x.io").await;

    let (status, users) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(status, StatusCode::OK);

    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], json!("alice"));
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password").is_none());
        assert!(!user.to_string().contains("argon2"));
    }
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_not_found() {
    let app = app();

    let uri = format!("/users/{}", Uuid::new_v4());
    let (status, body) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], json!("User not found."));

    let (status, _) = send(&app, empty_request("GET", "/users/not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_profile_and_password() {
    let app = app();
    create(&app, "alice", "a@x.io").await;
    let id = first_user_id(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/users/{id}"),
            json!({ "username": "alice2", "email": "a2@x.io", "password": "new-pw" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["username"], json!("alice2"));
    assert_eq!(body["email"], json!("a2@x.io"));

    let (_, fetched) = send(&app, empty_request("GET", &format!("/users/{id}"))).await;
    assert_eq!(fetched["username"], json!("alice2"));

    let sign_in = |email: &str, password: &str| {
        json_request(
            "POST",
            "/signin",
            json!({ "email": email, "password": password }),
        )
    };

    let (status, body) = send(&app, sign_in("a2@x.io", "new-pw")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["auth"], json!(true));

    let (status, _) = send(&app, sign_in("a2@x.io", "pw123")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, sign_in("a@x.io", "pw123")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_into_taken_email_is_a_server_error() {
    let app = app();
    create(&app, "alice", "a@x.io").await;
    create(&app, "bob", "b@x.io").await;
    let alice_id = first_user_id(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/users/{alice_id}"),
            json!({ "username": "alice", "email": "b@x.io", "password": "pw123" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], json!("Error updating user."));
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let app = app();

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/users/{}", Uuid::new_v4()),
            json!({ "username": "x", "email": "x@x.io", "password": "pw123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = app();
    create(&app, "alice", "a@x.io").await;
    let id = first_user_id(&app).await;

    let (status, _) = send(&app, empty_request("DELETE", &format!("/users/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, empty_request("DELETE", &format!("/users/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
