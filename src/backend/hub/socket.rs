/**
 * Hub Transport
 *
 * HTTP entry points of the collaboration hub:
 *
 * - `POST /hubs/cloudboard/negotiate` - connection id and available transports
 * - `GET /hubs/cloudboard` - WebSocket upgrade
 *
 * Both authenticate before doing anything else. Browsers cannot set headers
 * on WebSocket upgrades, so the token may come from `access_token` instead.
 *
 * # Connection Lifecycle
 *
 * 1. Upgrade, then wait for the handshake record (10 second limit)
 * 2. Register the connection with the hub and spawn the writer task
 * 3. Reader loop: parse records, dispatch invocations, answer with completions
 * 4. On close or error: unregister, which broadcasts `UserLeft`
 *
 * The writer task owns the socket sink. It drains the connection's outbound
 * channel and pings every 15 seconds; it ends once every sender is gone.
 */

use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::{stream::SplitStream, SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::groups::FrameSender;
use super::methods::{CloudBoardHub, HubInvocation};
use super::protocol::{handshake_response, parse_handshake, split_records, HubError, HubFrame, PING_INTERVAL};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::{authenticate, token_from_request};
use crate::backend::server::state::AppState;
use crate::shared::UserIdentity;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Query parameters accepted by the hub endpoints
///
/// SignalR clients also append `id=<connectionId>` after negotiating. It is
/// ignored: connection ids are assigned by the server at upgrade time.
#[derive(Debug, Default, Deserialize)]
pub struct HubQuery {
    pub access_token: Option<String>,
}

/// Handle negotiate (POST /hubs/cloudboard/negotiate)
///
/// Answers with negotiate version 0, so no connection token is issued. The
/// returned id only lets the client build its socket URL.
pub async fn negotiate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HubQuery>,
) -> Result<Json<Value>, BackendError> {
    let user = authenticate(&state.auth, token_from_request(&headers, query.access_token.as_deref()))?;

    let connection_id = Uuid::new_v4().to_string();
    tracing::debug!("[Hub] Negotiated connection {} for {}", connection_id, user.user_id);

    Ok(Json(json!({
        "negotiateVersion": 0,
        "connectionId": connection_id,
        "availableTransports": [
            { "transport": "WebSockets", "transferFormats": ["Text"] }
        ]
    })))
}

/// Handle hub connection (GET /hubs/cloudboard)
pub async fn hub_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HubQuery>,
) -> Result<Response, BackendError> {
    let user = authenticate(&state.auth, token_from_request(&headers, query.access_token.as_deref()))?;

    let connection_id = Uuid::new_v4().to_string();
    let hub = state.hub.clone();

    Ok(ws
        .on_upgrade(move |socket| run_connection(socket, hub, connection_id, user.identity()))
        .into_response())
}

async fn run_connection(socket: WebSocket, hub: CloudBoardHub, connection_id: String, user: UserIdentity) {
    let (mut sink, mut stream) = socket.split();

    let pending = match tokio::time::timeout(HANDSHAKE_TIMEOUT, read_handshake(&mut stream)).await {
        Ok(Ok(pending)) => {
            if sink.send(Message::Text(handshake_response(&Ok(())).into())).await.is_err() {
                return;
            }
            pending
        }
        Ok(Err(e)) => {
            tracing::warn!("[Hub] Handshake failed for {}: {}", connection_id, e);
            let _ = sink.send(Message::Text(handshake_response(&Err(e)).into())).await;
            let _ = sink.close().await;
            return;
        }
        Err(_) => {
            tracing::warn!("[Hub] Handshake timed out for {}", connection_id);
            let _ = sink.close().await;
            return;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<HubFrame>();
    if !hub.on_connected(&connection_id, user.clone(), tx.clone()).await {
        tracing::warn!("[Hub] Connection id {} already live, closing", connection_id);
        let _ = sink.close().await;
        return;
    }

    let writer = tokio::spawn(async move {
        let mut ping = tokio::time::interval(PING_INTERVAL);
        ping.tick().await;
        loop {
            tokio::select! {
                frame = rx.recv() => {
                    let Some(frame) = frame else { break };
                    let closing = matches!(frame, HubFrame::Close { .. });
                    if sink.send(Message::Text(frame.encode().into())).await.is_err() || closing {
                        break;
                    }
                }
                _ = ping.tick() => {
                    if sink.send(Message::Text(HubFrame::Ping.encode().into())).await.is_err() {
                        break;
                    }
                }
            }
        }
        let _ = sink.close().await;
    });

    'reader: {
        for record in &pending {
            if !handle_record(&hub, &connection_id, &user, record, &tx).await {
                break 'reader;
            }
        }

        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    for record in split_records(text.as_str()) {
                        if !handle_record(&hub, &connection_id, &user, record, &tx).await {
                            break 'reader;
                        }
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("[Hub] Socket error on {}: {}", connection_id, e);
                    break;
                }
            }
        }
    }

    hub.on_disconnected(&connection_id).await;
    drop(tx);
    let _ = writer.await;
}

/// Wait for the handshake record; records that arrived with it are returned
async fn read_handshake(stream: &mut SplitStream<WebSocket>) -> Result<Vec<String>, HubError> {
    while let Some(message) = stream.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => continue,
        };

        let mut records = split_records(text.as_str());
        let handshake = records
            .next()
            .ok_or_else(|| HubError::Protocol("empty handshake".to_string()))?;
        parse_handshake(handshake)?;
        return Ok(records.map(str::to_string).collect());
    }
    Err(HubError::Protocol("connection closed before handshake".to_string()))
}

/// Process one record; returns `false` when the connection should close
async fn handle_record(
    hub: &CloudBoardHub,
    connection_id: &str,
    user: &UserIdentity,
    record: &str,
    tx: &FrameSender,
) -> bool {
    match HubFrame::parse(record) {
        Ok(HubFrame::Invocation { invocation_id, target, arguments }) => {
            let result = match HubInvocation::parse(&target, &arguments) {
                Ok(invocation) => hub.invoke(connection_id, user, invocation).await,
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                tracing::warn!("[Hub] {} from {} failed: {}", target, connection_id, e);
            }
            if let Some(id) = invocation_id {
                let completion = match result {
                    Ok(()) => HubFrame::completion(id),
                    Err(e) => HubFrame::completion_error(id, &e),
                };
                let _ = tx.send(completion);
            }
            true
        }
        Ok(HubFrame::Ping) | Ok(HubFrame::Completion { .. }) => true,
        Ok(HubFrame::Close { .. }) => false,
        Err(HubError::UnsupportedMessageType(kind)) => {
            tracing::debug!("[Hub] Ignoring message type {} from {}", kind, connection_id);
            true
        }
        Err(e) => {
            tracing::warn!("[Hub] Closing {}: {}", connection_id, e);
            let _ = tx.send(HubFrame::Close {
                error: Some(e.to_string()),
                allow_reconnect: false,
            });
            false
        }
    }
}
