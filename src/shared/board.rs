//! Board Model
//!
//! Data transfer types for the board graph: boards, nodes, connectors and
//! connections, plus the request bodies accepted by the REST API. All types
//! serialize with camelCase field names.
//!
//! Ownership runs board → node → connector. Connections belong to a board and
//! reference two connectors; they carry no direct relation to nodes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::node_kind::NodeKind;

/// Longest accepted name for boards, nodes and connectors
pub const MAX_NAME_LENGTH: usize = 200;

/// A board with its complete graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudBoard {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl CloudBoard {
    /// Find a node by id
    pub fn node(&self, node_id: Uuid) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Find a node by id for mutation
    pub fn node_mut(&mut self, node_id: Uuid) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    /// Iterate over every connector of every node
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.nodes.iter().flat_map(|n| n.connectors.iter())
    }

    /// Drop connections whose connectors are no longer on the board
    ///
    /// Returns the ids of the removed connections.
    pub fn prune_dangling_connections(&mut self) -> Vec<Uuid> {
        let connector_ids: Vec<Uuid> = self.connectors().map(|c| c.id).collect();
        let mut removed = Vec::new();
        self.connections.retain(|connection| {
            let keep = connector_ids.contains(&connection.source_connector_id)
                && connector_ids.contains(&connection.target_connector_id);
            if !keep {
                removed.push(connection.id);
            }
            keep
        });
        removed
    }
}

/// A board without its graph, as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudBoardSummary {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CloudBoard> for CloudBoardSummary {
    fn from(board: &CloudBoard) -> Self {
        Self {
            id: board.id,
            name: board.name.clone(),
            owner: board.owner.clone(),
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}

/// A placeable item on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub kind: NodeKind,
    #[serde(default)]
    pub connectors: Vec<Connector>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Side of the node a connector sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl ConnectorPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorPosition::Top => "top",
            ConnectorPosition::Bottom => "bottom",
            ConnectorPosition::Left => "left",
            ConnectorPosition::Right => "right",
        }
    }
}

impl FromStr for ConnectorPosition {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(ConnectorPosition::Top),
            "bottom" => Ok(ConnectorPosition::Bottom),
            "left" => Ok(ConnectorPosition::Left),
            "right" => Ok(ConnectorPosition::Right),
            other => Err(SharedError::unknown_variant("connector position", other)),
        }
    }
}

impl fmt::Display for ConnectorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flow direction of a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorDirection {
    In,
    Out,
    InOut,
}

impl ConnectorDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorDirection::In => "in",
            ConnectorDirection::Out => "out",
            ConnectorDirection::InOut => "inout",
        }
    }
}

impl FromStr for ConnectorDirection {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(ConnectorDirection::In),
            "out" => Ok(ConnectorDirection::Out),
            "inout" => Ok(ConnectorDirection::InOut),
            other => Err(SharedError::unknown_variant("connector direction", other)),
        }
    }
}

impl fmt::Display for ConnectorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attachment point on a node's edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: Uuid,
    pub node_id: Uuid,
    pub name: String,
    pub position: ConnectorPosition,
    pub direction: ConnectorDirection,
}

/// A directed link between two connectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: Uuid,
    pub board_id: Uuid,
    pub source_connector_id: Uuid,
    pub target_connector_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// Request bodies

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCloudBoardRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCloudBoardRequest {
    pub id: Uuid,
    pub name: String,
}

/// Create a node; `id` may be supplied by clients that create locally first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub board_id: Uuid,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeRequest {
    pub id: Uuid,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePositionRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnectorRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub node_id: Uuid,
    pub name: String,
    pub position: ConnectorPosition,
    pub direction: ConnectorDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConnectorRequest {
    pub id: Uuid,
    pub name: String,
    pub position: ConnectorPosition,
    pub direction: ConnectorDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnectionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub board_id: Uuid,
    pub source_connector_id: Uuid,
    pub target_connector_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConnectionRequest {
    pub id: Uuid,
    pub source_connector_id: Uuid,
    pub target_connector_id: Uuid,
}

/// Check a user-supplied name
pub fn validate_name(field: &str, name: &str) -> Result<(), SharedError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, "cannot be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(SharedError::validation(
            field,
            format!("cannot be longer than {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(())
}

/// Check that a coordinate pair is usable (finite)
pub fn validate_position(x: f64, y: f64) -> Result<(), SharedError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(SharedError::validation("position", "coordinates must be finite numbers"));
    }
    Ok(())
}
