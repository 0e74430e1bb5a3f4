/**
 * CloudBoard Hub Methods
 *
 * Client-callable hub methods. All of them are fan-out only: apart from group
 * membership nothing is validated or persisted. Durable changes go through
 * the REST API, which notifies the groups through `HubNotifier`.
 *
 * # Methods
 *
 * | Target                 | Arguments                    | Broadcast               |
 * |------------------------|------------------------------|-------------------------|
 * | `JoinBoard`            | boardId                      | `UserJoined`            |
 * | `LeaveBoard`           | boardId                      | `UserLeft`              |
 * | `UpdateNodePosition`   | boardId, nodeId, x, y        | `NodePositionUpdated`   |
 * | `CreateNode`           | boardId, node                | `NodeCreated`           |
 * | `DeleteNode`           | boardId, nodeId              | `NodeDeleted`           |
 * | `CreateConnection`     | boardId, connection          | `ConnectionCreated`     |
 * | `UpdateCursorPosition` | boardId, x, y                | `CursorPositionUpdated` |
 * | `SendMessage`          | boardId, message             | `MessageReceived`       |
 *
 * Broadcasts go to the whole group, including the caller.
 */

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::groups::{board_group, GroupRegistry};
use super::protocol::{HubError, HubFrame};
use crate::shared::event::{ChangePayload, ChatPayload, CursorPayload, NodePositionPayload, RemovalPayload};
use crate::shared::{HubEvent, UserIdentity};

/// A parsed client invocation
#[derive(Debug, Clone, PartialEq)]
pub enum HubInvocation {
    JoinBoard { board_id: String },
    LeaveBoard { board_id: String },
    UpdateNodePosition { board_id: String, node_id: String, x: f64, y: f64 },
    CreateNode { board_id: String, node: Value },
    DeleteNode { board_id: String, node_id: String },
    CreateConnection { board_id: String, connection: Value },
    UpdateCursorPosition { board_id: String, x: f64, y: f64 },
    SendMessage { board_id: String, message: String },
}

fn expect_arity(method: &str, arguments: &[Value], expected: usize) -> Result<(), HubError> {
    if arguments.len() != expected {
        return Err(HubError::invalid_arguments(
            method,
            format!("expected {} argument(s), got {}", expected, arguments.len()),
        ));
    }
    Ok(())
}

fn argument<T: DeserializeOwned>(method: &str, arguments: &[Value], index: usize) -> Result<T, HubError> {
    let value = arguments
        .get(index)
        .cloned()
        .ok_or_else(|| HubError::invalid_arguments(method, format!("missing argument {}", index)))?;
    serde_json::from_value(value)
        .map_err(|e| HubError::invalid_arguments(method, format!("argument {}: {}", index, e)))
}

/// Ids may arrive as strings or numbers; both are carried as strings
fn id_argument(method: &str, arguments: &[Value], index: usize) -> Result<String, HubError> {
    match arguments.get(index) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(HubError::invalid_arguments(method, format!("argument {} must be an id", index))),
    }
}

impl HubInvocation {
    /// Decode a target and its positional arguments
    pub fn parse(target: &str, arguments: &[Value]) -> Result<Self, HubError> {
        let invocation = match target {
            "JoinBoard" => {
                expect_arity(target, arguments, 1)?;
                HubInvocation::JoinBoard { board_id: id_argument(target, arguments, 0)? }
            }
            "LeaveBoard" => {
                expect_arity(target, arguments, 1)?;
                HubInvocation::LeaveBoard { board_id: id_argument(target, arguments, 0)? }
            }
            "UpdateNodePosition" => {
                expect_arity(target, arguments, 4)?;
                HubInvocation::UpdateNodePosition {
                    board_id: id_argument(target, arguments, 0)?,
                    node_id: id_argument(target, arguments, 1)?,
                    x: argument(target, arguments, 2)?,
                    y: argument(target, arguments, 3)?,
                }
            }
            "CreateNode" => {
                expect_arity(target, arguments, 2)?;
                HubInvocation::CreateNode {
                    board_id: id_argument(target, arguments, 0)?,
                    node: arguments[1].clone(),
                }
            }
            "DeleteNode" => {
                expect_arity(target, arguments, 2)?;
                HubInvocation::DeleteNode {
                    board_id: id_argument(target, arguments, 0)?,
                    node_id: id_argument(target, arguments, 1)?,
                }
            }
            "CreateConnection" => {
                expect_arity(target, arguments, 2)?;
                HubInvocation::CreateConnection {
                    board_id: id_argument(target, arguments, 0)?,
                    connection: arguments[1].clone(),
                }
            }
            "UpdateCursorPosition" => {
                expect_arity(target, arguments, 3)?;
                HubInvocation::UpdateCursorPosition {
                    board_id: id_argument(target, arguments, 0)?,
                    x: argument(target, arguments, 1)?,
                    y: argument(target, arguments, 2)?,
                }
            }
            "SendMessage" => {
                expect_arity(target, arguments, 2)?;
                HubInvocation::SendMessage {
                    board_id: id_argument(target, arguments, 0)?,
                    message: argument(target, arguments, 1)?,
                }
            }
            other => return Err(HubError::UnknownMethod(other.to_string())),
        };
        Ok(invocation)
    }

    pub fn board_id(&self) -> &str {
        match self {
            HubInvocation::JoinBoard { board_id }
            | HubInvocation::LeaveBoard { board_id }
            | HubInvocation::UpdateNodePosition { board_id, .. }
            | HubInvocation::CreateNode { board_id, .. }
            | HubInvocation::DeleteNode { board_id, .. }
            | HubInvocation::CreateConnection { board_id, .. }
            | HubInvocation::UpdateCursorPosition { board_id, .. }
            | HubInvocation::SendMessage { board_id, .. } => board_id,
        }
    }
}

/// The collaboration hub: invocation dispatch and connection lifecycle
#[derive(Clone, Default)]
pub struct CloudBoardHub {
    registry: GroupRegistry,
}

impl CloudBoardHub {
    pub fn new(registry: GroupRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    /// Send an event to every member of a board's group
    ///
    /// Returns the number of connections reached.
    pub async fn broadcast(&self, board_id: &str, event: &HubEvent) -> Result<usize, HubError> {
        let group = board_group(board_id);
        let frame = HubFrame::event(event)?;
        let reached = self.registry.send_to_group(&group, &frame).await;
        tracing::debug!("[Hub] {} sent to {} ({} connections)", event.target(), group, reached);
        Ok(reached)
    }

    /// Execute a client invocation on behalf of `connection_id`
    pub async fn invoke(
        &self,
        connection_id: &str,
        user: &UserIdentity,
        invocation: HubInvocation,
    ) -> Result<(), HubError> {
        let board_id = invocation.board_id().to_string();
        let timestamp = Utc::now();

        let event = match invocation {
            HubInvocation::JoinBoard { .. } => {
                self.registry.add_to_group(connection_id, &board_group(&board_id)).await;
                tracing::info!("[Hub] {} joined board {}", user.user_id, board_id);
                HubEvent::user_joined(user)
            }
            HubInvocation::LeaveBoard { .. } => {
                self.registry.remove_from_group(connection_id, &board_group(&board_id)).await;
                tracing::info!("[Hub] {} left board {}", user.user_id, board_id);
                HubEvent::user_left(user)
            }
            HubInvocation::UpdateNodePosition { node_id, x, y, .. } => {
                HubEvent::NodePositionUpdated(NodePositionPayload {
                    node_id,
                    x,
                    y,
                    user_id: user.user_id.clone(),
                    timestamp,
                })
            }
            HubInvocation::CreateNode { node, .. } => HubEvent::NodeCreated(ChangePayload {
                board_id: board_id.clone(),
                entity: node,
                user_id: user.user_id.clone(),
                timestamp,
            }),
            HubInvocation::DeleteNode { node_id, .. } => HubEvent::NodeDeleted(RemovalPayload {
                board_id: board_id.clone(),
                entity_id: node_id,
                user_id: user.user_id.clone(),
                timestamp,
            }),
            HubInvocation::CreateConnection { connection, .. } => HubEvent::ConnectionCreated(ChangePayload {
                board_id: board_id.clone(),
                entity: connection,
                user_id: user.user_id.clone(),
                timestamp,
            }),
            HubInvocation::UpdateCursorPosition { x, y, .. } => HubEvent::CursorPositionUpdated(CursorPayload {
                user_id: user.user_id.clone(),
                user_name: user.user_name.clone(),
                x,
                y,
                timestamp,
            }),
            HubInvocation::SendMessage { message, .. } => HubEvent::MessageReceived(ChatPayload {
                user_id: user.user_id.clone(),
                user_name: user.user_name.clone(),
                message,
                timestamp,
            }),
        };

        self.broadcast(&board_id, &event).await?;
        Ok(())
    }

    /// Register a connection after a successful handshake
    ///
    /// Returns `false` if the connection id is already in use.
    pub async fn on_connected(&self, connection_id: &str, user: UserIdentity, sender: super::groups::FrameSender) -> bool {
        tracing::info!("[Hub] {} connected as {}", user.user_id, connection_id);
        self.registry.register(connection_id, user, sender).await
    }

    /// Drop a connection and tell the boards it was on
    pub async fn on_disconnected(&self, connection_id: &str) {
        let Some(gone) = self.registry.unregister(connection_id).await else {
            return;
        };
        tracing::info!("[Hub] {} disconnected ({})", gone.user.user_id, connection_id);

        let event = HubEvent::user_left(&gone.user);
        let frame = match HubFrame::event(&event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("[Hub] Failed to encode UserLeft: {}", e);
                return;
            }
        };
        for group in &gone.groups {
            self.registry.send_to_group(group, &frame).await;
        }
    }
}
