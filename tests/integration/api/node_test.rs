//! Node and connector endpoint integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::assert_api_error;
use crate::common::TestApp;

#[tokio::test]
async fn test_node_on_unknown_board_rejected() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/node")
        .authorization_bearer(app.token())
        .json(&json!({
            "boardId": Uuid::new_v4(),
            "name": "Orphan",
            "x": 0.0,
            "y": 0.0,
            "kind": { "type": "Note", "properties": { "text": "" } }
        }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_node_type_rejected() {
    let app = TestApp::new().await;
    let board = app.create_board("Types").await;
    let response = app
        .server
        .post("/api/node")
        .authorization_bearer(app.token())
        .json(&json!({
            "boardId": board["id"],
            "name": "Mystery",
            "x": 0.0,
            "y": 0.0,
            "kind": { "type": "Hologram", "properties": {} }
        }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_nodes_by_board() {
    let app = TestApp::new().await;
    let board = app.create_board("One").await;
    let other = app.create_board("Two").await;
    app.create_node(board["id"].as_str().unwrap(), "A").await;
    app.create_node(board["id"].as_str().unwrap(), "B").await;
    app.create_node(other["id"].as_str().unwrap(), "C").await;

    let response = app
        .server
        .get("/api/node")
        .add_query_param("boardId", board["id"].as_str().unwrap())
        .authorization_bearer(app.token())
        .await;
    response.assert_status_ok();
    let nodes: Vec<Value> = response.json();
    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|n| n["boardId"] == board["id"]));
}

#[tokio::test]
async fn test_patch_position() {
    let app = TestApp::new().await;
    let board = app.create_board("Moves").await;
    let node = app.create_node(board["id"].as_str().unwrap(), "Mover").await;
    let node_id = node["id"].as_str().unwrap();

    let response = app
        .server
        .patch(&format!("/api/node/{}/position", node_id))
        .authorization_bearer(app.token())
        .json(&json!({ "x": 300.5, "y": -12.0 }))
        .await;
    response.assert_status_ok();
    let moved: Value = response.json();
    assert_eq!(moved["x"], 300.5);
    assert_eq!(moved["y"], -12.0);
    assert_eq!(moved["name"], "Mover");
}

#[tokio::test]
async fn test_patch_properties_changes_type() {
    let app = TestApp::new().await;
    let board = app.create_board("Kinds").await;
    let node = app.create_node(board["id"].as_str().unwrap(), "Snippet").await;
    let node_id = node["id"].as_str().unwrap();

    let response = app
        .server
        .patch(&format!("/api/node/{}/properties", node_id))
        .authorization_bearer(app.token())
        .json(&json!({
            "type": "CodeBlock",
            "properties": { "language": "rust", "code": "fn main() {}" }
        }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["kind"]["type"], "CodeBlock");
    assert_eq!(updated["kind"]["properties"]["language"], "rust");

    let fetched: Value = app
        .server
        .get(&format!("/api/node/{}", node_id))
        .authorization_bearer(app.token())
        .await
        .json();
    assert_eq!(fetched["kind"], updated["kind"]);
}

#[tokio::test]
async fn test_patch_properties_unknown_type() {
    let app = TestApp::new().await;
    let board = app.create_board("Kinds").await;
    let node = app.create_node(board["id"].as_str().unwrap(), "Snippet").await;

    let response = app
        .server
        .patch(&format!("/api/node/{}/properties", node["id"].as_str().unwrap()))
        .authorization_bearer(app.token())
        .json(&json!({ "type": "Spreadsheet", "properties": {} }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_node_id_mismatch() {
    let app = TestApp::new().await;
    let board = app.create_board("Ids").await;
    let node = app.create_node(board["id"].as_str().unwrap(), "A").await;

    let response = app
        .server
        .put(&format!("/api/node/{}", node["id"].as_str().unwrap()))
        .authorization_bearer(app.token())
        .json(&json!({
            "id": Uuid::new_v4(),
            "name": "B",
            "x": 0.0,
            "y": 0.0,
            "kind": { "type": "Note", "properties": { "text": "" } }
        }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_node_full_update() {
    let app = TestApp::new().await;
    let board = app.create_board("Full").await;
    let node = app.create_node(board["id"].as_str().unwrap(), "A").await;
    let node_id = node["id"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/api/node/{}", node_id))
        .authorization_bearer(app.token())
        .json(&json!({
            "id": node_id,
            "name": "Renamed",
            "x": 1.0,
            "y": 2.0,
            "kind": { "type": "Card", "properties": { "title": "Todo" } }
        }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Renamed");
    assert_eq!(updated["kind"]["properties"]["title"], "Todo");
}

#[tokio::test]
async fn test_missing_node_is_404() {
    let app = TestApp::new().await;
    let missing = Uuid::new_v4();
    let response = app
        .server
        .patch(&format!("/api/node/{}/position", missing))
        .authorization_bearer(app.token())
        .json(&json!({ "x": 1.0, "y": 1.0 }))
        .await;
    assert_api_error!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_connector_lifecycle() {
    let app = TestApp::new().await;
    let board = app.create_board("Ports").await;
    let node = app.create_node(board["id"].as_str().unwrap(), "A").await;
    let connector = app.create_connector(node["id"].as_str().unwrap(), "out").await;
    let connector_id = connector["id"].as_str().unwrap();
    assert_eq!(connector["position"], "right");
    assert_eq!(connector["direction"], "out");

    let response = app
        .server
        .put(&format!("/api/connector/{}", connector_id))
        .authorization_bearer(app.token())
        .json(&json!({ "id": connector_id, "name": "left in", "position": "left", "direction": "in" }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["position"], "left");

    let response = app
        .server
        .delete(&format!("/api/connector/{}", connector_id))
        .authorization_bearer(app.token())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let fetched: Value = app
        .server
        .get(&format!("/api/node/{}", node["id"].as_str().unwrap()))
        .authorization_bearer(app.token())
        .await
        .json();
    assert!(fetched["connectors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_connector_on_unknown_node_rejected() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/connector")
        .authorization_bearer(app.token())
        .json(&json!({
            "nodeId": Uuid::new_v4(),
            "name": "out",
            "position": "top",
            "direction": "out"
        }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}
