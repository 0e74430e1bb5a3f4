/**
 * Hub Notification Service
 *
 * Pushes REST-side changes to the board groups. Handlers call these after a
 * write has committed.
 *
 * Each method wraps the changed aggregate (or the id for deletions) with the
 * acting user and a server timestamp and returns how many connections the
 * event was queued for. Delivery is fire-and-forget: no retry, no ack, and no
 * ordering guarantee relative to other writes on the same board.
 */

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::methods::CloudBoardHub;
use crate::shared::event::{ChangePayload, RemovalPayload};
use crate::shared::{CloudBoard, Connection, HubEvent, Node};

#[derive(Clone, Default)]
pub struct HubNotifier {
    hub: CloudBoardHub,
}

impl HubNotifier {
    pub fn new(hub: CloudBoardHub) -> Self {
        Self { hub }
    }

    async fn send(&self, board_id: Uuid, event: HubEvent) -> usize {
        match self.hub.broadcast(&board_id.to_string(), &event).await {
            Ok(reached) => {
                tracing::debug!("[Hub] Notified {} of {} on board {}", reached, event.target(), board_id);
                reached
            }
            Err(e) => {
                tracing::error!("[Hub] Failed to notify {} on board {}: {}", event.target(), board_id, e);
                0
            }
        }
    }

    fn change<T: Serialize>(board_id: Uuid, entity: &T, user_id: &str) -> Option<ChangePayload> {
        match serde_json::to_value(entity) {
            Ok(entity) => Some(ChangePayload {
                board_id: board_id.to_string(),
                entity,
                user_id: user_id.to_string(),
                timestamp: Utc::now(),
            }),
            Err(e) => {
                tracing::error!("[Hub] Failed to serialize notification entity: {}", e);
                None
            }
        }
    }

    fn removal(board_id: Uuid, entity_id: Uuid, user_id: &str) -> RemovalPayload {
        RemovalPayload {
            board_id: board_id.to_string(),
            entity_id: entity_id.to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Board renamed; carries the board summary without its graph
    pub async fn notify_cloudboard_updated(&self, board: &CloudBoard, user_id: &str) -> usize {
        let summary = crate::shared::CloudBoardSummary::from(board);
        match Self::change(board.id, &summary, user_id) {
            Some(payload) => self.send(board.id, HubEvent::CloudBoardUpdated(payload)).await,
            None => 0,
        }
    }

    pub async fn notify_cloudboard_deleted(&self, board_id: Uuid, user_id: &str) -> usize {
        self.send(board_id, HubEvent::CloudBoardDeleted(Self::removal(board_id, board_id, user_id)))
            .await
    }

    pub async fn notify_node_created(&self, node: &Node, user_id: &str) -> usize {
        match Self::change(node.board_id, node, user_id) {
            Some(payload) => self.send(node.board_id, HubEvent::NodeCreated(payload)).await,
            None => 0,
        }
    }

    pub async fn notify_node_updated(&self, node: &Node, user_id: &str) -> usize {
        match Self::change(node.board_id, node, user_id) {
            Some(payload) => self.send(node.board_id, HubEvent::NodeUpdated(payload)).await,
            None => 0,
        }
    }

    pub async fn notify_node_deleted(&self, board_id: Uuid, node_id: Uuid, user_id: &str) -> usize {
        self.send(board_id, HubEvent::NodeDeleted(Self::removal(board_id, node_id, user_id)))
            .await
    }

    pub async fn notify_connection_created(&self, connection: &Connection, user_id: &str) -> usize {
        match Self::change(connection.board_id, connection, user_id) {
            Some(payload) => self.send(connection.board_id, HubEvent::ConnectionCreated(payload)).await,
            None => 0,
        }
    }

    pub async fn notify_connection_deleted(&self, board_id: Uuid, connection_id: Uuid, user_id: &str) -> usize {
        self.send(
            board_id,
            HubEvent::ConnectionDeleted(Self::removal(board_id, connection_id, user_id)),
        )
        .await
    }
}
