//! Connector rows

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{decode_error, Removal};
use crate::shared::board::{CreateConnectorRequest, UpdateConnectorRequest};
use crate::shared::{ConnectorDirection, ConnectorPosition, Connector};

fn connector_from_row(row: &SqliteRow) -> Result<Connector, sqlx::Error> {
    let position: String = row.get("position");
    let direction: String = row.get("direction");

    Ok(Connector {
        id: row.get("id"),
        node_id: row.get("node_id"),
        name: row.get("name"),
        position: position.parse::<ConnectorPosition>().map_err(decode_error)?,
        direction: direction.parse::<ConnectorDirection>().map_err(decode_error)?,
    })
}

pub async fn list_connectors_for_node(pool: &SqlitePool, node_id: Uuid) -> Result<Vec<Connector>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, node_id, name, position, direction
        FROM connectors
        WHERE node_id = ?
        ORDER BY rowid ASC
        "#,
    )
    .bind(node_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(connector_from_row).collect()
}

/// Every connector of every node on a board
pub async fn list_connectors_for_board(pool: &SqlitePool, board_id: Uuid) -> Result<Vec<Connector>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT k.id, k.node_id, k.name, k.position, k.direction
        FROM connectors k
        JOIN nodes n ON n.id = k.node_id
        WHERE n.board_id = ?
        ORDER BY k.rowid ASC
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(connector_from_row).collect()
}

pub async fn get_connector(pool: &SqlitePool, connector_id: Uuid) -> Result<Option<Connector>, sqlx::Error> {
    let row = sqlx::query("SELECT id, node_id, name, position, direction FROM connectors WHERE id = ?")
        .bind(connector_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(connector_from_row).transpose()
}

/// Board a connector belongs to, through its node
pub async fn connector_board_id(pool: &SqlitePool, connector_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT n.board_id
        FROM connectors k
        JOIN nodes n ON n.id = k.node_id
        WHERE k.id = ?
        "#,
    )
    .bind(connector_id)
    .fetch_optional(pool)
    .await
}

pub async fn create_connector(pool: &SqlitePool, request: &CreateConnectorRequest) -> Result<Connector, sqlx::Error> {
    let id = request.id.unwrap_or_else(Uuid::new_v4);

    sqlx::query(
        r#"
        INSERT INTO connectors (id, node_id, name, position, direction)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(request.node_id)
    .bind(&request.name)
    .bind(request.position.as_str())
    .bind(request.direction.as_str())
    .execute(pool)
    .await?;

    Ok(Connector {
        id,
        node_id: request.node_id,
        name: request.name.clone(),
        position: request.position,
        direction: request.direction,
    })
}

pub async fn update_connector(pool: &SqlitePool, request: &UpdateConnectorRequest) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE connectors SET name = ?, position = ?, direction = ? WHERE id = ?")
        .bind(&request.name)
        .bind(request.position.as_str())
        .bind(request.direction.as_str())
        .bind(request.id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a connector and the connections attached to it
pub async fn delete_connector(pool: &SqlitePool, connector_id: Uuid) -> Result<Option<Removal>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let board_id: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT n.board_id
        FROM connectors k
        JOIN nodes n ON n.id = k.node_id
        WHERE k.id = ?
        "#,
    )
    .bind(connector_id)
    .fetch_optional(&mut *tx)
    .await?;
    let Some(board_id) = board_id else {
        return Ok(None);
    };

    let connection_ids: Vec<Uuid> = sqlx::query_scalar(
        "SELECT id FROM connections WHERE source_connector_id = ? OR target_connector_id = ?",
    )
    .bind(connector_id)
    .bind(connector_id)
    .fetch_all(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM connectors WHERE id = ?")
        .bind(connector_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(Removal { board_id, connection_ids }))
}
