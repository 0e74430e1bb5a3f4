//! Authentication integration tests

use axum::http::StatusCode;

use crate::assert_api_error;
use crate::common::{create_token, foreign_token, TestApp};

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = TestApp::new().await;
    let response = app.server.get("/api/cloudboard").await;
    assert_api_error!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new().await;
    let token = create_token("user-1", "Ada", -120);
    let response = app.server.get("/api/cloudboard").authorization_bearer(token).await;
    assert_api_error!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_rejected() {
    let app = TestApp::new().await;
    let response = app
        .server
        .get("/api/cloudboard")
        .authorization_bearer(foreign_token("user-1"))
        .await;
    assert_api_error!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_header_rejected() {
    let app = TestApp::new().await;
    let response = app
        .server
        .get("/api/cloudboard")
        .add_header(axum::http::header::AUTHORIZATION, axum::http::HeaderValue::from_static("Basic abc"))
        .await;
    assert_api_error!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() {
    let app = TestApp::new().await;
    let response = app
        .server
        .get("/api/does-not-exist")
        .authorization_bearer(app.token())
        .await;
    assert_api_error!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_negotiate_requires_token() {
    let app = TestApp::new().await;
    let response = app.server.post("/hubs/cloudboard/negotiate").await;
    assert_api_error!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_negotiate_with_query_token() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/hubs/cloudboard/negotiate")
        .add_query_param("access_token", app.token())
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["negotiateVersion"], 0);
    assert!(body["connectionId"].is_string());
    assert!(body.get("connectionToken").is_none());
    assert_eq!(body["availableTransports"][0]["transport"], "WebSockets");
}
