//! Posts and social accounts through the gated router, with tokens minted by
//! the real sign-up route.

use auth::{AuthAppState, AuthConfig, MemoryAuthRepository, auth_router, users_router};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use content::{MemoryOwnedRepository, Post, SocialAccount, content_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let state = AuthAppState::new(MemoryAuthRepository::new(), AuthConfig::with_random_secret());
    let gateway = state.gateway();

    auth_router(state.clone())
        .merge(users_router(state))
        .merge(content_router(
            MemoryOwnedRepository::<Post>::new(),
            MemoryOwnedRepository::<SocialAccount>::new(),
            gateway,
        ))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Returns (token, user id)
async fn sign_up(app: &Router, username: &str) -> (String, String) {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/signup",
            None,
            Some(json!({
                "username": username,
                "email": format!("{username}@x.io"),
                "password": "pw123",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (_, profile) = send(app, request("GET", "/user/dashboard", Some(&token), None)).await;
    let user_id = profile["id"].as_str().unwrap().to_string();

    (token, user_id)
}

fn post_body(content: &str) -> Value {
    json!({ "content": content, "scheduledAt": "2030-01-01T09:00:00Z" })
}

async fn create_post(app: &Router, token: &str, content: &str) -> Value {
    let (status, body) = send(
        app,
        request("POST", "/posts", Some(token), Some(post_body(content))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn new_user_creates_and_lists_posts() {
    let app = app();
    let (token, alice_id) = sign_up(&app, "alice").await;

    let (status, body) = send(&app, request("GET", "/posts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let post = create_post(&app, &token, "hello").await;
    assert_eq!(post["userId"], json!(alice_id));
    assert_eq!(post["content"], json!("hello"));
    assert_eq!(post["isPublished"], json!(false));

    let (status, body) = send(&app, request("GET", "/posts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_then_get_returns_supplied_fields() {
    let app = app();
    let (token, _) = sign_up(&app, "alice").await;

    let created = create_post(&app, &token, "round trip").await;
    let uri = format!("/posts/{}", created["id"].as_str().unwrap());

    let (status, fetched) = send(&app, request("GET", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["scheduledAt"], json!("2030-01-01T09:00:00Z"));
}

#[tokio::test]
async fn owner_field_in_body_is_ignored() {
    let app = app();
    let (alice, alice_id) = sign_up(&app, "alice").await;
    let (_, bob_id) = sign_up(&app, "bob").await;

    let mut body = post_body("mine");
    body["userId"] = json!(bob_id);
    body["user_id"] = json!(bob_id);

    let (status, post) = send(&app, request("POST", "/posts", Some(&alice), Some(body))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["userId"], json!(alice_id));
}

#[tokio::test]
async fn other_users_post_is_not_found() {
    let app = app();
    let (alice, _) = sign_up(&app, "alice").await;
    let (bob, _) = sign_up(&app, "bob").await;

    let post = create_post(&app, &alice, "private").await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    let (status, body) = send(&app, request("GET", &uri, Some(&bob), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], json!("Post not found."));

    let (status, _) = send(
        &app,
        request("PUT", &uri, Some(&bob), Some(post_body("hijack"))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, request("DELETE", &uri, Some(&bob), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(&app, request("GET", "/posts", Some(&bob), None)).await;
    assert_eq!(listed, json!([]));

    let (status, unchanged) = send(&app, request("GET", &uri, Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["content"], json!("private"));
}

#[tokio::test]
async fn update_and_delete_own_post() {
    let app = app();
    let (token, _) = sign_up(&app, "alice").await;

    let post = create_post(&app, &token, "draft").await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    let changes = json!({
        "content": "final",
        "scheduledAt": "2031-06-01T12:00:00Z",
        "isPublished": true,
    });
    let (status, updated) = send(&app, request("PUT", &uri, Some(&token), Some(changes))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], json!("final"));
    assert_eq!(updated["isPublished"], json!(true));
    assert_eq!(updated["id"], post["id"]);
    assert_eq!(updated["createdAt"], post["createdAt"]);

    // isPublished omitted: unchanged
    let (_, updated) = send(
        &app,
        request("PUT", &uri, Some(&token), Some(post_body("again"))),
    )
    .await;
    assert_eq!(updated["isPublished"], json!(true));

    let (status, _) = send(&app, request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request("GET", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let app = app();
    let (token, _) = sign_up(&app, "alice").await;

    let (status, body) =
        send(&app, request("GET", "/posts/not-a-uuid", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], json!("Post not found."));
}

#[tokio::test]
async fn empty_content_is_bad_request() {
    let app = app();
    let (token, _) = sign_up(&app, "alice").await;

    let (status, _) = send(
        &app,
        request("POST", "/posts", Some(&token), Some(post_body("  "))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_schedule_is_bad_request() {
    let app = app();
    let (token, _) = sign_up(&app, "alice").await;

    let body = json!({ "content": "hi" });
    let (status, problem) = send(&app, request("POST", "/posts", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["status"], json!(400));
    assert!(!problem["detail"].as_str().unwrap().contains("scheduledAt"));

    let (_, listed) = send(&app, request("GET", "/posts", Some(&token), None)).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn routes_require_a_token() {
    let app = app();

    for uri in ["/posts", "/social_media_accounts"] {
        let (status, body) = send(&app, request("GET", uri, None, None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "auth": false, "message": "No token provided." }));

        let (status, body) = send(&app, request("GET", uri, Some("garbage"), None)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "auth": false, "message": "Failed to authenticate token." })
        );
    }
}

#[tokio::test]
async fn deleting_a_user_keeps_their_posts() {
    let app = app();
    let (token, user_id) = sign_up(&app, "alice").await;
    create_post(&app, &token, "survivor").await;

    let uri = format!("/users/{user_id}");
    let (status, _) = send(&app, request("DELETE", &uri, None, None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The token outlives the account and still names the same owner
    let (status, body) = send(&app, request("GET", "/posts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn social_account_lifecycle() {
    let app = app();
    let (alice, alice_id) = sign_up(&app, "alice").await;
    let (bob, _) = sign_up(&app, "bob").await;

    let (status, account) = send(
        &app,
        request(
            "POST",
            "/social_media_accounts",
            Some(&alice),
            Some(json!({ "platform": "mastodon", "accessToken": "tok-1" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(account["userId"], json!(alice_id));
    assert_eq!(account["accessToken"], json!("tok-1"));

    let uri = format!("/social_media_accounts/{}", account["id"].as_str().unwrap());

    let (status, body) = send(&app, request("GET", &uri, Some(&bob), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], json!("Social media account not found."));

    let (status, updated) = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(&alice),
            Some(json!({ "platform": "bluesky", "accessToken": "tok-2" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["platform"], json!("bluesky"));
    assert_eq!(updated["accessToken"], json!("tok-2"));

    let (status, listed) = send(
        &app,
        request("GET", "/social_media_accounts", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([updated]));

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/social_media_accounts",
            Some(&alice),
            Some(json!({ "platform": "", "accessToken": "tok-3" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, request("DELETE", &uri, Some(&alice), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request("DELETE", &uri, Some(&alice), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
