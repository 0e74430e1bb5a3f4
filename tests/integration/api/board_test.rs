//! Board endpoint integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::assert_api_error;
use crate::common::TestApp;

#[tokio::test]
async fn test_create_and_list_boards() {
    let app = TestApp::new().await;
    let created = app.create_board("Roadmap").await;
    assert_eq!(created["name"], "Roadmap");
    assert_eq!(created["owner"], "user-1");

    let response = app.server.get("/api/cloudboard").authorization_bearer(app.token()).await;
    response.assert_status_ok();
    let boards: Vec<Value> = response.json();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["id"], created["id"]);
    assert!(boards[0].get("nodes").is_none());
}

#[tokio::test]
async fn test_create_board_with_blank_name_rejected() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/cloudboard")
        .authorization_bearer(app.token())
        .json(&json!({ "name": "   " }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_board_scenario() {
    let app = TestApp::new().await;
    let board = app.create_board("Test").await;
    let board_id = board["id"].as_str().unwrap();

    let first = app.create_node(board_id, "First").await;
    let second = app.create_node(board_id, "Second").await;
    let out = app.create_connector(first["id"].as_str().unwrap(), "out").await;
    let inp = app.create_connector(second["id"].as_str().unwrap(), "in").await;
    let connection = app
        .create_connection(board_id, out["id"].as_str().unwrap(), inp["id"].as_str().unwrap())
        .await;

    let response = app
        .server
        .get(&format!("/api/cloudboard/{}", board_id))
        .authorization_bearer(app.token())
        .await;
    response.assert_status_ok();
    let full: Value = response.json();

    let nodes = full["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    let connector_count: usize = nodes.iter().map(|n| n["connectors"].as_array().unwrap().len()).sum();
    assert_eq!(connector_count, 2);

    let connections = full["connections"].as_array().unwrap();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0]["id"], connection["id"]);
    assert_eq!(connections[0]["sourceConnectorId"], out["id"]);
    assert_eq!(connections[0]["targetConnectorId"], inp["id"]);
}

#[tokio::test]
async fn test_rename_board() {
    let app = TestApp::new().await;
    let board = app.create_board("Draft").await;
    let board_id = board["id"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/api/cloudboard/{}", board_id))
        .authorization_bearer(app.token())
        .json(&json!({ "id": board_id, "name": "Final" }))
        .await;
    response.assert_status_ok();
    let renamed: Value = response.json();
    assert_eq!(renamed["name"], "Final");
}

#[tokio::test]
async fn test_rename_board_id_mismatch() {
    let app = TestApp::new().await;
    let board = app.create_board("Draft").await;
    let board_id = board["id"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/api/cloudboard/{}", board_id))
        .authorization_bearer(app.token())
        .json(&json!({ "id": Uuid::new_v4(), "name": "Final" }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_board_is_404() {
    let app = TestApp::new().await;
    let missing = Uuid::new_v4();

    let response = app
        .server
        .get(&format!("/api/cloudboard/{}", missing))
        .authorization_bearer(app.token())
        .await;
    assert_api_error!(response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .delete(&format!("/api/cloudboard/{}", missing))
        .authorization_bearer(app.token())
        .await;
    assert_api_error!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_board_cascades() {
    let app = TestApp::new().await;
    let board = app.create_board("Doomed").await;
    let board_id = board["id"].as_str().unwrap();
    let a = app.create_node(board_id, "A").await;
    let b = app.create_node(board_id, "B").await;
    let ca = app.create_connector(a["id"].as_str().unwrap(), "out").await;
    let cb = app.create_connector(b["id"].as_str().unwrap(), "in").await;
    let connection = app
        .create_connection(board_id, ca["id"].as_str().unwrap(), cb["id"].as_str().unwrap())
        .await;

    let response = app
        .server
        .delete(&format!("/api/cloudboard/{}", board_id))
        .authorization_bearer(app.token())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    for path in [
        format!("/api/cloudboard/{}", board_id),
        format!("/api/node/{}", a["id"].as_str().unwrap()),
        format!("/api/connector/{}", ca["id"].as_str().unwrap()),
        format!("/api/connection/{}", connection["id"].as_str().unwrap()),
    ] {
        let response = app.server.get(&path).authorization_bearer(app.token()).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_invalid_json_body_is_400() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/cloudboard")
        .authorization_bearer(app.token())
        .json(&json!({ "title": "wrong field" }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}
