//! HTTP tests for login, token presentation and the admin gate.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use campfire_auth::NOT_AUTHORIZED_MESSAGE;
use campfire_auth::jwt::SESSION_TTL_SECONDS;

use helpers::{BOB_RENAMED_TOKEN, BOB_TOKEN, PROVIDER_DOWN_TOKEN, TestApp};

fn partner_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Mongo Fly Shop",
        "image": "images/mongo-logo.png",
        "description": "Boasting the best selection of fly fishing gear",
    })
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.create_test_user("alice", "hunter2", false).await;

    let response = app
        .request(
            "POST",
            "/users/login",
            Some(serde_json::json!({ "username": "alice", "password": "hunter2" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["status"], "You are successfully logged in!");
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(response.body["expires_at"].is_string());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new();
    app.create_test_user("alice", "hunter2", false).await;

    let response = app
        .request(
            "POST",
            "/users/login",
            Some(serde_json::json!({ "username": "alice", "password": "hunter3" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["status"], 401);
    assert_eq!(response.body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_login_nonexistent_user_looks_like_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/users/login",
            Some(serde_json::json!({ "username": "nobody", "password": "hunter2" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_login_empty_fields_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/users/login",
            Some(serde_json::json!({ "username": "", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice", "hunter2", false).await;
    let token = app.login("alice", "hunter2").await;

    let response = app.request("GET", "/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], alice.id.to_string());
    assert_eq!(response.body["data"]["username"], "alice");
    assert_eq!(response.body["data"]["admin"], false);
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let app = TestApp::new();

    let missing = app.request("GET", "/users/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/users/me", None, Some("not-a-token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let wrong_scheme = app
        .request_with_headers("GET", "/users/me", None, &[("Authorization", "Basic abc")])
        .await;
    assert_eq!(wrong_scheme.status, StatusCode::UNAUTHORIZED);

    // Every cause produces the same body.
    assert_eq!(missing.body, garbage.body);
    assert_eq!(missing.body, wrong_scheme.body);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice", "hunter2", false).await;

    let issued_at = Utc::now() - Duration::seconds(SESSION_TTL_SECONDS + 1);
    let issued = app.state.tokens.issue_at(&alice, issued_at).unwrap();

    let response = app
        .request("GET", "/users/me", None, Some(&issued.token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_denied_with_fixed_message() {
    let app = TestApp::new();
    app.create_test_user("alice", "hunter2", false).await;
    let token = app.login("alice", "hunter2").await;

    let response = app
        .request("POST", "/partners", Some(partner_body()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["status"], 403);
    assert_eq!(response.body["message"], NOT_AUTHORIZED_MESSAGE);

    let listed = app.request("GET", "/partners", None, None).await;
    assert_eq!(listed.body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_admin_route_without_token_is_unauthorized_not_forbidden() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/partners", Some(partner_body()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_facebook_first_login_provisions_then_reuses_user() {
    let app = TestApp::new();

    let first = app
        .request(
            "GET",
            &format!("/users/facebook/token?access_token={BOB_TOKEN}"),
            None,
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["status"], "You are successfully logged in!");
    let first_token = first.body["token"].as_str().unwrap().to_string();

    let me = app.request("GET", "/users/me", None, Some(&first_token)).await;
    assert_eq!(me.body["data"]["username"], "Bob Jones");
    assert_eq!(me.body["data"]["facebook_id"], "fb-123");
    assert_eq!(me.body["data"]["first_name"], "Bob");
    assert_eq!(me.body["data"]["admin"], false);
    let bob_id = me.body["data"]["id"].clone();

    // Same Facebook account, changed profile: the stored user is not altered.
    let second = app
        .request(
            "POST",
            "/users/facebook/token",
            Some(serde_json::json!({ "access_token": BOB_RENAMED_TOKEN })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    let second_token = second.body["token"].as_str().unwrap().to_string();

    let me = app.request("GET", "/users/me", None, Some(&second_token)).await;
    assert_eq!(me.body["data"]["id"], bob_id);
    assert_eq!(me.body["data"]["username"], "Bob Jones");
    assert_eq!(me.body["data"]["first_name"], "Bob");
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_facebook_token_from_header() {
    let app = TestApp::new();

    let response = app
        .request_with_headers(
            "GET",
            "/users/facebook/token",
            None,
            &[("access_token", BOB_TOKEN)],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_facebook_rejected_or_missing_token_is_unauthorized() {
    let app = TestApp::new();

    let rejected = app
        .request("GET", "/users/facebook/token?access_token=bogus", None, None)
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);

    let missing = app.request("GET", "/users/facebook/token", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_facebook_outage_is_bad_gateway() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            &format!("/users/facebook/token?access_token={PROVIDER_DOWN_TOKEN}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
