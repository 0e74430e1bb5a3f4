/**
 * Board Service
 *
 * Keeps a local copy of one board and reconciles it with the server.
 *
 * # Local edits
 *
 * Moves, property edits and renames change the local board at once and are
 * persisted after a quiet period (cancel-and-replace per node and field).
 * Failures of a debounced call are logged and otherwise dropped: no retry and
 * no rollback of the local value.
 *
 * # Remote events
 *
 * `apply_remote_event` folds hub events into the local board, last write
 * wins. Events for other boards and payloads that don't parse are ignored.
 */

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::client::api::BoardApi;
use crate::client::debounce::Debouncer;
use crate::client::error::{ClientError, ClientResult};
use crate::shared::board::{
    validate_name, validate_position, CloudBoardSummary, CreateConnectionRequest,
    CreateConnectorRequest, CreateNodeRequest, NodePositionRequest, UpdateNodeRequest,
};
use crate::shared::config::AppConfig;
use crate::shared::event::{ChangePayload, RemovalPayload};
use crate::shared::{CloudBoard, Connection, Connector, HubEvent, Node, NodeKind};

/// Which part of a node a debounced edit persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    Position,
    Properties,
    Name,
}

type EditKey = (Uuid, EditField);

pub struct BoardService<A> {
    api: Arc<A>,
    board: Arc<RwLock<Option<CloudBoard>>>,
    edits: Debouncer<EditKey>,
    config: AppConfig,
}

impl<A: BoardApi> BoardService<A> {
    pub fn new(api: A, config: AppConfig) -> Self {
        Self {
            api: Arc::new(api),
            board: Arc::new(RwLock::new(None)),
            edits: Debouncer::new(),
            config,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the local board
    pub async fn board(&self) -> Option<CloudBoard> {
        self.board.read().await.clone()
    }

    pub async fn node(&self, node_id: Uuid) -> Option<Node> {
        self.board.read().await.as_ref().and_then(|b| b.node(node_id).cloned())
    }

    /// Debounced edits whose timer has not fired yet
    pub fn pending_edits(&self) -> usize {
        self.edits.pending_count()
    }

    /// Fetch a board and replace the local copy; pending edits are dropped
    pub async fn load_board(&self, board_id: Uuid) -> ClientResult<()> {
        let board = self.api.get_board(board_id).await?;
        self.edits.cancel_all();
        tracing::info!(
            "[Board] Loaded '{}' with {} nodes and {} connections",
            board.name,
            board.nodes.len(),
            board.connections.len()
        );
        *self.board.write().await = Some(board);
        Ok(())
    }

    async fn with_node<R>(&self, node_id: Uuid, f: impl FnOnce(&mut Node) -> R) -> ClientResult<R> {
        let mut guard = self.board.write().await;
        let board = guard.as_mut().ok_or(ClientError::NoBoard)?;
        let node = board
            .node_mut(node_id)
            .ok_or_else(|| ClientError::unknown("node", node_id))?;
        Ok(f(node))
    }

    /// Move a node locally and persist the final position after the position window
    pub async fn move_node(&self, node_id: Uuid, x: f64, y: f64) -> ClientResult<()> {
        validate_position(x, y)?;
        self.with_node(node_id, |node| {
            node.x = x;
            node.y = y;
        })
        .await?;

        let api = Arc::clone(&self.api);
        let position = NodePositionRequest { x, y };
        self.edits.schedule(
            (node_id, EditField::Position),
            self.config.position_debounce,
            async move {
                if let Err(e) = api.update_node_position(node_id, &position).await {
                    tracing::warn!("[Board] Failed to persist position of node {}: {}", node_id, e);
                }
            },
        );
        Ok(())
    }

    /// Replace a node's kind locally and persist it after the property window
    pub async fn update_node_properties(&self, node_id: Uuid, kind: NodeKind) -> ClientResult<()> {
        kind.validate()?;
        self.with_node(node_id, |node| node.kind = kind.clone()).await?;

        let api = Arc::clone(&self.api);
        self.edits.schedule(
            (node_id, EditField::Properties),
            self.config.property_debounce,
            async move {
                if let Err(e) = api.update_node_properties(node_id, &kind).await {
                    tracing::warn!("[Board] Failed to persist properties of node {}: {}", node_id, e);
                }
            },
        );
        Ok(())
    }

    /// Rename a node locally and persist it after the property window
    ///
    /// The full update is built from the local node when the timer fires.
    pub async fn rename_node(&self, node_id: Uuid, name: &str) -> ClientResult<()> {
        validate_name("name", name)?;
        let name = name.to_string();
        self.with_node(node_id, |node| node.name = name).await?;

        let api = Arc::clone(&self.api);
        let board = Arc::clone(&self.board);
        self.edits.schedule(
            (node_id, EditField::Name),
            self.config.property_debounce,
            async move {
                let request = board
                    .read()
                    .await
                    .as_ref()
                    .and_then(|b| b.node(node_id))
                    .map(|node| UpdateNodeRequest {
                        id: node.id,
                        name: node.name.clone(),
                        x: node.x,
                        y: node.y,
                        kind: node.kind.clone(),
                    });
                let Some(request) = request else {
                    tracing::debug!("[Board] Node {} vanished before rename was persisted", node_id);
                    return;
                };
                if let Err(e) = api.update_node(&request).await {
                    tracing::warn!("[Board] Failed to persist name of node {}: {}", node_id, e);
                }
            },
        );
        Ok(())
    }

    pub async fn create_node(&self, request: CreateNodeRequest) -> ClientResult<Node> {
        let node = self.api.create_node(&request).await?;
        let mut guard = self.board.write().await;
        if let Some(board) = guard.as_mut().filter(|b| b.id == node.board_id) {
            upsert_node(board, node.clone());
        }
        Ok(node)
    }

    /// Delete a node; pending edits for it are cancelled first
    pub async fn delete_node(&self, node_id: Uuid) -> ClientResult<()> {
        for field in [EditField::Position, EditField::Properties, EditField::Name] {
            self.edits.cancel(&(node_id, field));
        }
        self.api.delete_node(node_id).await?;
        if let Some(board) = self.board.write().await.as_mut() {
            remove_node(board, node_id);
        }
        Ok(())
    }

    pub async fn create_connector(&self, request: CreateConnectorRequest) -> ClientResult<Connector> {
        let connector = self.api.create_connector(&request).await?;
        if let Some(board) = self.board.write().await.as_mut() {
            if let Some(node) = board.node_mut(connector.node_id) {
                node.connectors.retain(|c| c.id != connector.id);
                node.connectors.push(connector.clone());
            }
        }
        Ok(connector)
    }

    pub async fn create_connection(&self, request: CreateConnectionRequest) -> ClientResult<Connection> {
        let connection = self.api.create_connection(&request).await?;
        let mut guard = self.board.write().await;
        if let Some(board) = guard.as_mut().filter(|b| b.id == connection.board_id) {
            upsert_connection(board, connection.clone());
        }
        Ok(connection)
    }

    pub async fn delete_connection(&self, connection_id: Uuid) -> ClientResult<()> {
        self.api.delete_connection(connection_id).await?;
        if let Some(board) = self.board.write().await.as_mut() {
            board.connections.retain(|c| c.id != connection_id);
        }
        Ok(())
    }

    /// Fold a hub event into the local board
    ///
    /// Returns whether the local board changed.
    pub async fn apply_remote_event(&self, event: &HubEvent) -> bool {
        let mut guard = self.board.write().await;
        let Some(board) = guard.as_mut() else {
            return false;
        };

        if let Some(event_board) = event.board_id() {
            if event_board != board.id.to_string() {
                tracing::debug!("[Board] Ignoring {} for board {}", event.target(), event_board);
                return false;
            }
        }

        match event {
            HubEvent::NodePositionUpdated(p) => match Uuid::parse_str(&p.node_id) {
                Ok(node_id) => match board.node_mut(node_id) {
                    Some(node) => {
                        node.x = p.x;
                        node.y = p.y;
                        true
                    }
                    None => false,
                },
                Err(_) => {
                    tracing::warn!("[Board] Ignoring position update for invalid node id '{}'", p.node_id);
                    false
                }
            },
            HubEvent::NodeCreated(p) | HubEvent::NodeUpdated(p) => match entity::<Node>(event, p) {
                Some(node) if node.board_id == board.id => {
                    upsert_node(board, node);
                    true
                }
                _ => false,
            },
            HubEvent::NodeDeleted(p) => match removed_id(event, p) {
                Some(node_id) => remove_node(board, node_id),
                None => false,
            },
            HubEvent::ConnectionCreated(p) => match entity::<Connection>(event, p) {
                Some(connection) if connection.board_id == board.id => {
                    upsert_connection(board, connection);
                    true
                }
                _ => false,
            },
            HubEvent::ConnectionDeleted(p) => match removed_id(event, p) {
                Some(connection_id) => {
                    let before = board.connections.len();
                    board.connections.retain(|c| c.id != connection_id);
                    board.connections.len() != before
                }
                None => false,
            },
            HubEvent::CloudBoardUpdated(p) => match entity::<CloudBoardSummary>(event, p) {
                Some(summary) => {
                    board.name = summary.name;
                    board.updated_at = summary.updated_at;
                    true
                }
                None => false,
            },
            HubEvent::CloudBoardDeleted(_) => {
                tracing::info!("[Board] Board {} was deleted remotely", board.id);
                self.edits.cancel_all();
                *guard = None;
                true
            }
            HubEvent::UserJoined(_)
            | HubEvent::UserLeft(_)
            | HubEvent::CursorPositionUpdated(_)
            | HubEvent::MessageReceived(_) => false,
        }
    }
}

fn entity<T: serde::de::DeserializeOwned>(event: &HubEvent, payload: &ChangePayload) -> Option<T> {
    match serde_json::from_value(payload.entity.clone()) {
        Ok(entity) => Some(entity),
        Err(e) => {
            tracing::warn!("[Board] Ignoring {} with unexpected payload: {}", event.target(), e);
            None
        }
    }
}

fn removed_id(event: &HubEvent, payload: &RemovalPayload) -> Option<Uuid> {
    match Uuid::parse_str(&payload.entity_id) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!("[Board] Ignoring {} for invalid id '{}'", event.target(), payload.entity_id);
            None
        }
    }
}

fn upsert_node(board: &mut CloudBoard, node: Node) {
    match board.node_mut(node.id) {
        Some(existing) => *existing = node,
        None => board.nodes.push(node),
    }
}

fn upsert_connection(board: &mut CloudBoard, connection: Connection) {
    match board.connections.iter_mut().find(|c| c.id == connection.id) {
        Some(existing) => *existing = connection,
        None => board.connections.push(connection),
    }
}

/// Drop a node and every connection that referenced its connectors
fn remove_node(board: &mut CloudBoard, node_id: Uuid) -> bool {
    let before = board.nodes.len();
    board.nodes.retain(|n| n.id != node_id);
    if board.nodes.len() == before {
        return false;
    }
    let pruned = board.prune_dangling_connections();
    if !pruned.is_empty() {
        tracing::debug!("[Board] Dropped {} connections of node {}", pruned.len(), node_id);
    }
    true
}
