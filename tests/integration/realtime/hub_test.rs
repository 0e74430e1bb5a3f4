//! Collaboration hub over a real WebSocket

use axum::http::StatusCode;
use axum_test::TestWebSocket;
use serde_json::{json, Value};

use cloudboard::backend::hub::board_group;

use crate::common::{create_token, TestApp};

const RS: char = '\u{1e}';

async fn connect(app: &TestApp, token: &str) -> TestWebSocket {
    let mut socket = app
        .server
        .get_websocket("/hubs/cloudboard")
        .add_query_param("access_token", token)
        .await
        .into_websocket()
        .await;

    socket
        .send_text(format!("{}{}", json!({ "protocol": "json", "version": 1 }), RS))
        .await;
    assert_eq!(socket.receive_text().await, format!("{{}}{}", RS));
    socket
}

/// Next non-ping record
async fn receive(socket: &mut TestWebSocket) -> Value {
    loop {
        let text = socket.receive_text().await;
        let record = text.trim_end_matches(RS);
        let value: Value = serde_json::from_str(record).expect("record is not JSON");
        if value["type"] != 6 {
            return value;
        }
    }
}

async fn invoke(socket: &mut TestWebSocket, id: &str, target: &str, arguments: Value) {
    let message = json!({
        "type": 1,
        "invocationId": id,
        "target": target,
        "arguments": arguments
    });
    socket.send_text(format!("{}{}", message, RS)).await;
}

/// Join a board and consume the caller's own `UserJoined` and the completion
async fn join(socket: &mut TestWebSocket, board_id: &str) {
    invoke(socket, "join", "JoinBoard", json!([board_id])).await;
    let joined = receive(socket).await;
    assert_eq!(joined["target"], "UserJoined");
    let completion = receive(socket).await;
    assert_eq!(completion["type"], 3);
    assert_eq!(completion["invocationId"], "join");
    assert!(completion.get("error").is_none());
}

#[tokio::test]
async fn test_hub_requires_token() {
    let app = TestApp::with_http_transport().await;
    let response = app.server.get_websocket("/hubs/cloudboard").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_position_broadcast_reaches_board_only() {
    let app = TestApp::with_http_transport().await;
    let ada = app.token().to_string();
    let grace = create_token("user-2", "Grace", 3600);
    let alan = create_token("user-3", "Alan", 3600);

    let mut a = connect(&app, &ada).await;
    let mut b = connect(&app, &grace).await;
    let mut c = connect(&app, &alan).await;

    join(&mut a, "board-x").await;
    join(&mut b, "board-x").await;
    let seen_by_a = receive(&mut a).await;
    assert_eq!(seen_by_a["target"], "UserJoined");
    assert_eq!(seen_by_a["arguments"][0]["userId"], "user-2");
    join(&mut c, "board-y").await;

    invoke(&mut a, "move", "UpdateNodePosition", json!(["board-x", "node-1", 12.5, 40])).await;

    for socket in [&mut a, &mut b] {
        let event = receive(socket).await;
        assert_eq!(event["target"], "NodePositionUpdated");
        assert_eq!(event["arguments"][0]["nodeId"], "node-1");
        assert_eq!(event["arguments"][0]["x"], 12.5);
        assert_eq!(event["arguments"][0]["userId"], "user-1");
    }
    assert_eq!(receive(&mut a).await["invocationId"], "move");

    // The next thing board-y sees is its own cursor, not the node move.
    invoke(&mut c, "cursor", "UpdateCursorPosition", json!(["board-y", 1, 2])).await;
    let event = receive(&mut c).await;
    assert_eq!(event["target"], "CursorPositionUpdated");
    assert_eq!(event["arguments"][0]["userName"], "Alan");
}

#[tokio::test]
async fn test_client_supplied_id_cannot_take_over_connection() {
    let app = TestApp::with_http_transport().await;
    let ada = app.token().to_string();
    let eve = create_token("user-9", "Eve", 3600);

    let mut a = app
        .server
        .get_websocket("/hubs/cloudboard")
        .add_query_param("access_token", &ada)
        .add_query_param("id", "shared")
        .await
        .into_websocket()
        .await;
    a.send_text(format!("{}{}", json!({ "protocol": "json", "version": 1 }), RS))
        .await;
    assert_eq!(a.receive_text().await, format!("{{}}{}", RS));
    join(&mut a, "secret-board").await;

    let mut e = app
        .server
        .get_websocket("/hubs/cloudboard")
        .add_query_param("access_token", &eve)
        .add_query_param("id", "shared")
        .await
        .into_websocket()
        .await;
    e.send_text(format!("{}{}", json!({ "protocol": "json", "version": 1 }), RS))
        .await;
    assert_eq!(e.receive_text().await, format!("{{}}{}", RS));

    invoke(&mut a, "move", "UpdateNodePosition", json!(["secret-board", "node-1", 1, 2])).await;
    assert_eq!(receive(&mut a).await["target"], "NodePositionUpdated");
    assert_eq!(receive(&mut a).await["invocationId"], "move");

    // Eve's first record is her own completion, not Ada's node move.
    invoke(&mut e, "cursor", "UpdateCursorPosition", json!(["her-board", 3, 4])).await;
    let first = receive(&mut e).await;
    assert_eq!(first["type"], 3);
    assert_eq!(first["invocationId"], "cursor");

    let registry = app.state.hub.registry();
    assert_eq!(registry.connection_count().await, 2);
    assert_eq!(registry.member_count(&board_group("secret-board")).await, 1);
    assert!(registry.user("shared").await.is_none());
}

#[tokio::test]
async fn test_disconnect_broadcasts_user_left() {
    let app = TestApp::with_http_transport().await;
    let ada = app.token().to_string();
    let grace = create_token("user-2", "Grace", 3600);

    let mut a = connect(&app, &ada).await;
    let mut b = connect(&app, &grace).await;
    join(&mut a, "42").await;
    join(&mut b, "42").await;
    assert_eq!(receive(&mut a).await["target"], "UserJoined");

    b.close().await;

    let left = receive(&mut a).await;
    assert_eq!(left["target"], "UserLeft");
    assert_eq!(left["arguments"][0]["userId"], "user-2");
    assert_eq!(left["arguments"][0]["userName"], "Grace");
}

#[tokio::test]
async fn test_unknown_method_completes_with_error() {
    let app = TestApp::with_http_transport().await;
    let mut socket = connect(&app, app.token()).await;

    invoke(&mut socket, "7", "DropAllTables", json!([])).await;
    let completion = receive(&mut socket).await;
    assert_eq!(completion["type"], 3);
    assert_eq!(completion["invocationId"], "7");
    assert!(completion["error"].as_str().unwrap().contains("DropAllTables"));
}

#[tokio::test]
async fn test_bad_arguments_complete_with_error() {
    let app = TestApp::with_http_transport().await;
    let mut socket = connect(&app, app.token()).await;

    invoke(&mut socket, "8", "UpdateNodePosition", json!(["board", "node", "left", 1])).await;
    let completion = receive(&mut socket).await;
    assert_eq!(completion["invocationId"], "8");
    assert!(completion["error"].is_string());
}

#[tokio::test]
async fn test_unsupported_protocol_handshake() {
    let app = TestApp::with_http_transport().await;
    let mut socket = app
        .server
        .get_websocket("/hubs/cloudboard")
        .add_query_param("access_token", app.token())
        .await
        .into_websocket()
        .await;

    socket
        .send_text(format!("{}{}", json!({ "protocol": "messagepack", "version": 1 }), RS))
        .await;
    let text = socket.receive_text().await;
    let response: Value = serde_json::from_str(text.trim_end_matches(RS)).unwrap();
    assert!(response["error"].as_str().unwrap().contains("messagepack"));
}
