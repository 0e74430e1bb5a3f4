//! REST writes reaching the board's hub group

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{drain_events, TestApp};

#[tokio::test]
async fn test_node_create_and_move_are_announced() {
    let app = TestApp::new().await;
    let board = app.create_board("Live").await;
    let board_id = board["id"].as_str().unwrap();
    let mut rx = app.listen_to_board(board_id.parse().unwrap()).await;

    let node = app.create_node(board_id, "A").await;
    app.server
        .patch(&format!("/api/node/{}/position", node["id"].as_str().unwrap()))
        .authorization_bearer(app.token())
        .json(&json!({ "x": 5.0, "y": 6.0 }))
        .await
        .assert_status_ok();

    let events = drain_events(&mut rx);
    let targets: Vec<&str> = events.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(targets, vec!["NodeCreated", "NodeUpdated"]);

    let (_, created) = &events[0];
    assert_eq!(created["boardId"], board_id);
    assert_eq!(created["entity"]["id"], node["id"]);
    assert_eq!(created["userId"], "user-1");
    assert!(created["timestamp"].is_string());
    assert_eq!(events[1].1["entity"]["x"], 5.0);
}

#[tokio::test]
async fn test_node_delete_announces_removed_connections() {
    let app = TestApp::new().await;
    let board = app.create_board("Live").await;
    let board_id = board["id"].as_str().unwrap();
    let a = app.create_node(board_id, "A").await;
    let b = app.create_node(board_id, "B").await;
    let out = app.create_connector(a["id"].as_str().unwrap(), "out").await;
    let inp = app.create_connector(b["id"].as_str().unwrap(), "in").await;
    let connection = app
        .create_connection(board_id, out["id"].as_str().unwrap(), inp["id"].as_str().unwrap())
        .await;

    let mut rx = app.listen_to_board(board_id.parse().unwrap()).await;
    app.server
        .delete(&format!("/api/node/{}", a["id"].as_str().unwrap()))
        .authorization_bearer(app.token())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let events = drain_events(&mut rx);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, "ConnectionDeleted");
    assert_eq!(events[0].1["entityId"], connection["id"]);
    assert_eq!(events[1].0, "NodeDeleted");
    assert_eq!(events[1].1["entityId"], a["id"]);
}

#[tokio::test]
async fn test_notifications_stay_on_their_board() {
    let app = TestApp::new().await;
    let board = app.create_board("Mine").await;
    let other = app.create_board("Theirs").await;
    let mut mine = app.listen_to_board(board["id"].as_str().unwrap().parse().unwrap()).await;
    let mut theirs = app.listen_to_board(other["id"].as_str().unwrap().parse().unwrap()).await;

    app.create_node(board["id"].as_str().unwrap(), "Only here").await;

    assert_eq!(drain_events(&mut mine).len(), 1);
    assert!(drain_events(&mut theirs).is_empty());
}

#[tokio::test]
async fn test_board_rename_and_delete_are_announced() {
    let app = TestApp::new().await;
    let board = app.create_board("Old").await;
    let board_id = board["id"].as_str().unwrap();
    let mut rx = app.listen_to_board(board_id.parse().unwrap()).await;

    app.server
        .put(&format!("/api/cloudboard/{}", board_id))
        .authorization_bearer(app.token())
        .json(&json!({ "id": board_id, "name": "New" }))
        .await
        .assert_status_ok();
    app.server
        .delete(&format!("/api/cloudboard/{}", board_id))
        .authorization_bearer(app.token())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let events = drain_events(&mut rx);
    assert_eq!(events[0].0, "CloudBoardUpdated");
    assert_eq!(events[0].1["entity"]["name"], "New");
    assert_eq!(events[1].0, "CloudBoardDeleted");
    assert_eq!(events[1].1["entityId"], board_id);
}
