//! API Integration Tests
//!
//! Each test spawns a real server on a local port backed by the in-memory
//! credential store. Tests named `*_postgres` additionally need
//! `DATABASE_URL` and are skipped without it.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn register(server: &TestServer, request: &RegisterRequest) -> RegisterResponse {
    let response = server.post("/api/auth/register", request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn login(server: &TestServer, request: &RegisterRequest) -> LoginResponse {
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(request))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_banner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "JWT Authentication API Running"
    );
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// End-to-end Scenario
// ============================================================================

#[tokio::test]
async fn test_register_login_me_scenario() {
    let server = TestServer::start().await.expect("Failed to start server");
    let alice = RegisterRequest::alice();

    let registered = register(&server, &alice).await;
    assert_eq!(registered.message, "User registered successfully");
    assert_eq!(registered.user.username, "alice");
    assert_eq!(registered.user.email, "alice@x.com");
    assert!(!registered.user.id.is_empty());

    let logged_in = login(&server, &alice).await;
    assert_eq!(logged_in.message, "Login successful");
    assert_eq!(logged_in.token_type, "Bearer");
    assert_eq!(logged_in.expires_in, 3600);
    assert!(!logged_in.token.is_empty());

    let response = server
        .get_auth("/api/users/me", &logged_in.token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let me: CurrentUserResponse = serde_json::from_value(body).unwrap();
    assert_eq!(me.message, "User fetched successfully");
    assert_eq!(me.user.id, registered.user.id);
    assert_eq!(me.user.username, "alice");
    assert_eq!(me.user.email, "alice@x.com");
    assert!(!me.user.created_at.is_empty());

    let response = server.get("/api/users/me").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTH");
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    register(&server, &request).await;

    let second = RegisterRequest {
        username: "someone-else".to_string(),
        ..request.clone()
    };
    let response = server.post("/api/auth/register", &second).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    let url = format!("{}/api/auth/register", server.base_url());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = server.client.clone();
        let url = url.clone();
        let body = request.clone();
        handles.push(tokio::spawn(async move {
            client.post(&url).json(&body).send().await.map(|r| r.status())
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap().unwrap());
    }

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, statuses.len() - 1);
}

#[tokio::test]
async fn test_register_validation() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/auth/register", &json!({"username": "alice", "email": "alice@x.com"}))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["password"].is_array());

    let response = server
        .post("/api/auth/register", &RegisterRequest::new("alice", "", "secret123"))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"]["details"]["email"].is_array());
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_failures_are_identical() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    register(&server, &request).await;

    let wrong_password = server
        .post(
            "/api/auth/login",
            &json!({"email": request.email, "password": "wrong-password"}),
        )
        .await
        .unwrap();
    let wrong_password: ErrorBody = assert_json(wrong_password, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    let unknown_email = server
        .post(
            "/api/auth/login",
            &json!({"email": "nobody@example.com", "password": request.password}),
        )
        .await
        .unwrap();
    let unknown_email: ErrorBody = assert_json(unknown_email, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.error.code, "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.error.message, "Invalid email or password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post("/api/auth/login", &json!({})).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
}

// ============================================================================
// Auth Gate Tests
// ============================================================================

#[tokio::test]
async fn test_me_rejects_bad_tokens() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_with_authorization("/api/users/me", "Basic YWxpY2U6c2VjcmV0")
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTH");

    let response = server.get_auth("/api/users/me", "not.a.token").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_token_from_other_server_rejected() {
    let issuer = TestServer::start_with(&[(
        "JWT_SECRET",
        "a-different-secret-that-is-also-32-bytes-long",
    )])
    .await
    .expect("Failed to start server");
    let verifier = TestServer::start().await.expect("Failed to start server");

    let request = RegisterRequest::alice();
    register(&issuer, &request).await;
    let token = login(&issuer, &request).await.token;

    let response = verifier.get_auth("/api/users/me", &token).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_token_expires() {
    let server = TestServer::start_with(&[("JWT_EXPIRES_IN", "1s")])
        .await
        .expect("Failed to start server");
    let request = RegisterRequest::alice();
    register(&server, &request).await;
    let logged_in = login(&server, &request).await;
    assert_eq!(logged_in.expires_in, 1);

    tokio::time::sleep(Duration::from_millis(2100)).await;

    let response = server
        .get_auth("/api/users/me", &logged_in.token)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "INVALID_TOKEN");
    assert_eq!(error.error.message, "Invalid or expired token");
}

// ============================================================================
// PostgreSQL-backed Tests
// ============================================================================

#[tokio::test]
async fn test_scenario_postgres() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_postgres()
        .await
        .expect("Failed to start server");
    let request = RegisterRequest::unique();

    let registered = register(&server, &request).await;
    let token = login(&server, &request).await.token;

    let response = server.get_auth("/api/users/me", &token).await.unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.user.id, registered.user.id);
    assert_eq!(me.user.email, request.email);

    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
