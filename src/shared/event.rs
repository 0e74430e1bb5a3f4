/**
 * Hub Event System
 *
 * This module defines the events pushed by the collaboration hub to every
 * connection in a board's group. Each event has a fixed target name (the
 * client-side handler name, e.g. `NodePositionUpdated`) and a single JSON
 * payload argument.
 *
 * Payloads that relay client data (`NodeCreated` from the hub, for example)
 * keep that data opaque as a `serde_json::Value`; the hub never validates it.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Who performed an action, as shown to the other members of a board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub user_id: String,
    pub user_name: String,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }
}

/// `UserJoined` / `UserLeft`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePayload {
    pub user_id: String,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
}

/// `NodePositionUpdated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePositionPayload {
    pub node_id: String,
    pub x: f64,
    pub y: f64,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// `CursorPositionUpdated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPayload {
    pub user_id: String,
    pub user_name: String,
    pub x: f64,
    pub y: f64,
    pub timestamp: DateTime<Utc>,
}

/// `MessageReceived`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub user_id: String,
    pub user_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A created or updated entity (node, connection, board)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePayload {
    pub board_id: String,
    pub entity: serde_json::Value,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// A removed entity, identified by id only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalPayload {
    pub board_id: String,
    pub entity_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Event pushed to the members of a board group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "payload")]
pub enum HubEvent {
    UserJoined(PresencePayload),
    UserLeft(PresencePayload),
    NodePositionUpdated(NodePositionPayload),
    NodeCreated(ChangePayload),
    NodeUpdated(ChangePayload),
    NodeDeleted(RemovalPayload),
    ConnectionCreated(ChangePayload),
    ConnectionDeleted(RemovalPayload),
    CursorPositionUpdated(CursorPayload),
    CloudBoardUpdated(ChangePayload),
    CloudBoardDeleted(RemovalPayload),
    MessageReceived(ChatPayload),
}

impl HubEvent {
    /// Client handler name the event is delivered to
    pub fn target(&self) -> &'static str {
        match self {
            HubEvent::UserJoined(_) => "UserJoined",
            HubEvent::UserLeft(_) => "UserLeft",
            HubEvent::NodePositionUpdated(_) => "NodePositionUpdated",
            HubEvent::NodeCreated(_) => "NodeCreated",
            HubEvent::NodeUpdated(_) => "NodeUpdated",
            HubEvent::NodeDeleted(_) => "NodeDeleted",
            HubEvent::ConnectionCreated(_) => "ConnectionCreated",
            HubEvent::ConnectionDeleted(_) => "ConnectionDeleted",
            HubEvent::CursorPositionUpdated(_) => "CursorPositionUpdated",
            HubEvent::CloudBoardUpdated(_) => "CloudBoardUpdated",
            HubEvent::CloudBoardDeleted(_) => "CloudBoardDeleted",
            HubEvent::MessageReceived(_) => "MessageReceived",
        }
    }

    /// The single invocation argument carried on the wire
    pub fn payload(&self) -> Result<serde_json::Value, SharedError> {
        let mut tagged = serde_json::to_value(self)?;
        tagged
            .get_mut("payload")
            .map(serde_json::Value::take)
            .ok_or_else(|| SharedError::serialization("hub event has no payload"))
    }

    /// Rebuild an event from an invocation target and its first argument
    pub fn from_invocation(target: &str, payload: serde_json::Value) -> Result<Self, SharedError> {
        let tagged = serde_json::json!({ "target": target, "payload": payload });
        serde_json::from_value(tagged).map_err(|e| {
            SharedError::serialization(format!("invalid '{}' event: {}", target, e))
        })
    }

    pub fn user_joined(user: &UserIdentity) -> Self {
        HubEvent::UserJoined(PresencePayload {
            user_id: user.user_id.clone(),
            user_name: user.user_name.clone(),
            timestamp: Utc::now(),
        })
    }

    pub fn user_left(user: &UserIdentity) -> Self {
        HubEvent::UserLeft(PresencePayload {
            user_id: user.user_id.clone(),
            user_name: user.user_name.clone(),
            timestamp: Utc::now(),
        })
    }

    /// Board id the event refers to, when the payload carries one
    pub fn board_id(&self) -> Option<&str> {
        match self {
            HubEvent::NodeCreated(p)
            | HubEvent::NodeUpdated(p)
            | HubEvent::ConnectionCreated(p)
            | HubEvent::CloudBoardUpdated(p) => Some(&p.board_id),
            HubEvent::NodeDeleted(p)
            | HubEvent::ConnectionDeleted(p)
            | HubEvent::CloudBoardDeleted(p) => Some(&p.board_id),
            _ => None,
        }
    }
}
