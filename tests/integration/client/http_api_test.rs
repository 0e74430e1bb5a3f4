//! HttpBoardApi and BoardService against a mocked server

use std::time::Duration;

use assert_matches::assert_matches;
use chrono::Utc;
use cloudboard::client::{BoardApi, BoardService, ClientConfig, ClientError, HttpBoardApi};
use cloudboard::shared::board::{CreateConnectionRequest, NodePositionRequest};
use cloudboard::shared::config::AppConfig;
use cloudboard::shared::node_kind::CardProperties;
use cloudboard::shared::{CloudBoard, Connection, Node, NodeKind};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn api_for(server: &MockServer) -> HttpBoardApi {
    let config = ClientConfig::with_builder(AppConfig::builder().server_url(server.uri()))
        .unwrap()
        .with_token(TOKEN);
    HttpBoardApi::new(config)
}

fn fast_config() -> AppConfig {
    AppConfig::builder()
        .position_debounce(Duration::from_millis(50))
        .property_debounce(Duration::from_millis(80))
        .build()
        .unwrap()
}

fn sample_board() -> CloudBoard {
    let id = Uuid::new_v4();
    let node = Node {
        id: Uuid::new_v4(),
        board_id: id,
        name: "Idea".to_string(),
        x: 0.0,
        y: 0.0,
        kind: NodeKind::default(),
        connectors: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    CloudBoard {
        id,
        name: "Remote".to_string(),
        owner: "user-1".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        nodes: vec![node],
        connections: Vec::new(),
    }
}

async fn mount_board(server: &MockServer, board: &CloudBoard) {
    Mock::given(method("GET"))
        .and(path(format!("/api/cloudboard/{}", board.id)))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(board))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_board_sends_bearer_token() {
    let server = MockServer::start().await;
    let board = sample_board();
    mount_board(&server, &board).await;

    let api = api_for(&server);
    let fetched = api.get_board(board.id).await.unwrap();
    assert_eq!(fetched, board);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/connection"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Connector does not exist", "status": 400 })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api
        .create_connection(&CreateConnectionRequest {
            id: None,
            board_id: Uuid::new_v4(),
            source_connector_id: Uuid::new_v4(),
            target_connector_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert_matches!(&err, ClientError::Status { status: 400, body } if body.contains("Connector"));
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    let node_id = Uuid::new_v4();
    Mock::given(method("PATCH"))
        .and(path(format!("/api/node/{}/position", node_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api
        .update_node_position(node_id, &NodePositionRequest { x: 1.0, y: 2.0 })
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Decode(_));
}

#[tokio::test]
async fn test_rapid_property_edits_send_one_request() {
    let server = MockServer::start().await;
    let board = sample_board();
    let node = board.nodes[0].clone();
    mount_board(&server, &board).await;

    Mock::given(method("PATCH"))
        .and(path(format!("/api/node/{}/properties", node.id)))
        .and(body_partial_json(json!({ "type": "Card", "properties": { "title": "Final" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&node))
        .expect(1)
        .mount(&server)
        .await;

    let service = BoardService::new(api_for(&server), fast_config());
    service.load_board(board.id).await.unwrap();

    for title in ["Draft", "Final"] {
        let kind = NodeKind::Card(CardProperties {
            title: title.to_string(),
            ..Default::default()
        });
        service.update_node_properties(node.id, kind).await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(400)).await;

    let requests = server.received_requests().await.unwrap();
    let patches = requests.iter().filter(|r| r.method.as_str() == "PATCH").count();
    assert_eq!(patches, 1);
    server.verify().await;
}

#[tokio::test]
async fn test_failed_move_keeps_local_position() {
    let server = MockServer::start().await;
    let board = sample_board();
    let node_id = board.nodes[0].id;
    mount_board(&server, &board).await;

    Mock::given(method("PATCH"))
        .and(path(format!("/api/node/{}/position", node_id)))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let service = BoardService::new(api_for(&server), fast_config());
    service.load_board(board.id).await.unwrap();
    service.move_node(node_id, 70.0, 80.0).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    let node = service.node(node_id).await.unwrap();
    assert_eq!((node.x, node.y), (70.0, 80.0));
    server.verify().await;
}

#[tokio::test]
async fn test_create_connection_updates_local_board() {
    let server = MockServer::start().await;
    let board = sample_board();
    mount_board(&server, &board).await;

    let connection = Connection {
        id: Uuid::new_v4(),
        board_id: board.id,
        source_connector_id: Uuid::new_v4(),
        target_connector_id: Uuid::new_v4(),
        created_at: Utc::now(),
    };
    Mock::given(method("POST"))
        .and(path("/api/connection"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&connection))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/connection/{}", connection.id)))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let service = BoardService::new(api_for(&server), fast_config());
    service.load_board(board.id).await.unwrap();
    let created = service
        .create_connection(CreateConnectionRequest {
            id: Some(connection.id),
            board_id: board.id,
            source_connector_id: connection.source_connector_id,
            target_connector_id: connection.target_connector_id,
        })
        .await
        .unwrap();
    assert_eq!(created, connection);
    assert_eq!(service.board().await.unwrap().connections, vec![connection.clone()]);

    service.delete_connection(connection.id).await.unwrap();
    assert!(service.board().await.unwrap().connections.is_empty());
}
