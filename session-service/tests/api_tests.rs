mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use session_service::domain::user::models::UserId;

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "username": "alice",
            "password": "pw1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"]["updated_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "username": "alice",
            "password": "pw2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_user_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "username": "a",
            "password": "pw1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_returns_tokens_for_new_player() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice", "pw1").await;

    let data = app.login("alice", "pw1").await;

    assert_eq!(data["id"], registered["id"]);
    assert_eq!(data["username"], "alice");
    assert!(data["save_id"].is_null());

    let refresh_token = data["refresh_token"].as_str().unwrap();
    assert_eq!(refresh_token.len(), 64);
    assert!(refresh_token.chars().all(|c| c.is_ascii_hexdigit()));

    let subject = app
        .authenticator
        .validate_access_token(data["token"].as_str().unwrap())
        .expect("Access token should validate");
    assert_eq!(subject, registered["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_login_returns_save_id_for_returning_player() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice", "pw1").await;
    let user_id = UserId::from_string(registered["id"].as_str().unwrap()).unwrap();
    let save_id = app.store.insert_save(user_id).await;

    let data = app.login("alice", "pw1").await;

    assert_eq!(data["save_id"], save_id.to_string());
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_user_alike() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;

    let mut messages = Vec::new();
    for (username, password) in [("alice", "wrong"), ("bob", "pw1")] {
        let response = app
            .post("/api/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        messages.push(body["data"]["message"].clone());
    }

    assert_eq!(messages[0], "Incorrect username or password");
    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice", "pw1").await;
    let data = app.login("alice", "pw1").await;

    let response = app
        .post_authenticated("/api/refresh", data["refresh_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let subject = app
        .authenticator
        .validate_access_token(body["data"]["token"].as_str().unwrap())
        .expect("Access token should validate");
    assert_eq!(subject, registered["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_refresh_does_not_rotate_token() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;
    let data = app.login("alice", "pw1").await;
    let refresh_token = data["refresh_token"].as_str().unwrap();

    for _ in 0..2 {
        let response = app
            .post_authenticated("/api/refresh", refresh_token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_refresh_unknown_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post_authenticated("/api/refresh", "deadbeef")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or missing refresh token");
}

#[tokio::test]
async fn test_refresh_without_bearer_header() {
    let app = TestApp::spawn().await;

    let missing = app
        .post("/api/refresh")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let wrong_scheme = app
        .post("/api/refresh")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_scheme.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_revoke_then_refresh_fails() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;
    let data = app.login("alice", "pw1").await;
    let refresh_token = data["refresh_token"].as_str().unwrap();

    let response = app
        .post_authenticated("/api/revoke", refresh_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .post_authenticated("/api/refresh", refresh_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Revoking again is not an error.
    let response = app
        .post_authenticated("/api/revoke", refresh_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_revoke_unknown_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post_authenticated("/api/revoke", "deadbeef")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoke_without_bearer_header() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/revoke")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_two_logins_get_independent_refresh_tokens() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;

    let first = app.login("alice", "pw1").await;
    let second = app.login("alice", "pw1").await;
    assert_ne!(first["refresh_token"], second["refresh_token"]);

    app.post_authenticated("/api/revoke", first["refresh_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post_authenticated("/api/refresh", second["refresh_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_current_user_with_access_token() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice", "pw1").await;
    let data = app.login("alice", "pw1").await;

    let response = app
        .get_authenticated("/api/users/me", data["token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], registered["id"]);
    assert_eq!(body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_current_user_rejects_refresh_token_and_missing_header() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;
    let data = app.login("alice", "pw1").await;

    let response = app
        .get_authenticated("/api/users/me", data["refresh_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_rejects_token_from_other_issuer() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice", "pw1").await;

    let foreign = auth::Authenticator::new(common::JWT_SECRET, "someone-else")
        .issue_access_token(
            registered["id"].as_str().unwrap(),
            chrono::Duration::hours(1),
        )
        .unwrap();

    let response = app
        .get_authenticated("/api/users/me", &foreign)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_json_uses_envelope() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/login")
        .header("Content-Type", "application/json")
        .body("{username: alice}")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
    assert!(body["data"]["message"].is_string());
}

#[tokio::test]
async fn test_missing_field_uses_envelope() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 422);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("password"));
}

#[tokio::test]
async fn test_unknown_user_login_takes_as_long_as_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;

    let mut fastest = Vec::new();
    for username in ["alice", "bobby"] {
        let mut best = std::time::Duration::MAX;
        for _ in 0..3 {
            let started = std::time::Instant::now();
            let response = app
                .post("/api/login")
                .json(&json!({ "username": username, "password": "wrong" }))
                .send()
                .await
                .expect("Failed to execute request");
            best = best.min(started.elapsed());
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
        fastest.push(best);
    }

    let (wrong_password, unknown_user) = (fastest[0], fastest[1]);
    assert!(
        unknown_user * 4 >= wrong_password,
        "{unknown_user:?} vs {wrong_password:?}"
    );
}
