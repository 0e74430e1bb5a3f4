//! Node rows
//!
//! The node body is stored as a `node_type` tag plus a JSON `properties`
//! document; see `NodeKind::from_parts`.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{connectors, decode_error, Removal};
use crate::shared::board::{CreateNodeRequest, UpdateNodeRequest};
use crate::shared::{Node, NodeKind};

fn node_from_row(row: &SqliteRow) -> Result<Node, sqlx::Error> {
    let node_type: String = row.get("node_type");
    let properties: String = row.get("properties");
    let kind = NodeKind::from_parts(&node_type, &properties).map_err(decode_error)?;

    Ok(Node {
        id: row.get("id"),
        board_id: row.get("board_id"),
        name: row.get("name"),
        x: row.get("x"),
        y: row.get("y"),
        kind,
        connectors: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn encode_kind(kind: &NodeKind) -> Result<String, sqlx::Error> {
    kind.properties_json().map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// List the nodes of a board with their connectors
pub async fn list_nodes(pool: &SqlitePool, board_id: Uuid) -> Result<Vec<Node>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, board_id, name, x, y, node_type, properties, created_at, updated_at
        FROM nodes
        WHERE board_id = ?
        ORDER BY created_at ASC
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    let mut nodes = rows.iter().map(node_from_row).collect::<Result<Vec<_>, _>>()?;

    let mut by_node: HashMap<Uuid, Vec<_>> = HashMap::new();
    for connector in connectors::list_connectors_for_board(pool, board_id).await? {
        by_node.entry(connector.node_id).or_default().push(connector);
    }
    for node in &mut nodes {
        node.connectors = by_node.remove(&node.id).unwrap_or_default();
    }

    Ok(nodes)
}

/// Load a single node with its connectors
pub async fn get_node(pool: &SqlitePool, node_id: Uuid) -> Result<Option<Node>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, board_id, name, x, y, node_type, properties, created_at, updated_at
        FROM nodes
        WHERE id = ?
        "#,
    )
    .bind(node_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut node = node_from_row(&row)?;
    node.connectors = connectors::list_connectors_for_node(pool, node_id).await?;
    Ok(Some(node))
}

/// Insert a node; a client-supplied id is kept
pub async fn create_node(pool: &SqlitePool, request: &CreateNodeRequest) -> Result<Node, sqlx::Error> {
    let id = request.id.unwrap_or_else(Uuid::new_v4);
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO nodes (id, board_id, name, x, y, node_type, properties, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(request.board_id)
    .bind(&request.name)
    .bind(request.x)
    .bind(request.y)
    .bind(request.kind.type_name())
    .bind(encode_kind(&request.kind)?)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Node {
        id,
        board_id: request.board_id,
        name: request.name.clone(),
        x: request.x,
        y: request.y,
        kind: request.kind.clone(),
        connectors: Vec::new(),
        created_at: now,
        updated_at: now,
    })
}

/// Replace name, position and body; returns `false` if the node does not exist
pub async fn update_node(pool: &SqlitePool, request: &UpdateNodeRequest) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE nodes
        SET name = ?, x = ?, y = ?, node_type = ?, properties = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&request.name)
    .bind(request.x)
    .bind(request.y)
    .bind(request.kind.type_name())
    .bind(encode_kind(&request.kind)?)
    .bind(Utc::now())
    .bind(request.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_node_position(pool: &SqlitePool, node_id: Uuid, x: f64, y: f64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE nodes SET x = ?, y = ?, updated_at = ? WHERE id = ?")
        .bind(x)
        .bind(y)
        .bind(Utc::now())
        .bind(node_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Replace the node body; the node type may change
pub async fn update_node_kind(pool: &SqlitePool, node_id: Uuid, kind: &NodeKind) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE nodes SET node_type = ?, properties = ?, updated_at = ? WHERE id = ?")
        .bind(kind.type_name())
        .bind(encode_kind(kind)?)
        .bind(Utc::now())
        .bind(node_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a node with its connectors and every connection touching them
///
/// Returns `None` if the node does not exist.
pub async fn delete_node(pool: &SqlitePool, node_id: Uuid) -> Result<Option<Removal>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let board_id: Option<Uuid> = sqlx::query_scalar("SELECT board_id FROM nodes WHERE id = ?")
        .bind(node_id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(board_id) = board_id else {
        return Ok(None);
    };

    let connection_ids: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT DISTINCT c.id
        FROM connections c
        JOIN connectors k ON k.id = c.source_connector_id OR k.id = c.target_connector_id
        WHERE k.node_id = ?
        "#,
    )
    .bind(node_id)
    .fetch_all(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM nodes WHERE id = ?")
        .bind(node_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(Removal { board_id, connection_ids }))
}
