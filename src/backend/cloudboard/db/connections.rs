//! Connection rows

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::shared::board::CreateConnectionRequest;
use crate::shared::Connection;

fn connection_from_row(row: &SqliteRow) -> Connection {
    Connection {
        id: row.get("id"),
        board_id: row.get("board_id"),
        source_connector_id: row.get("source_connector_id"),
        target_connector_id: row.get("target_connector_id"),
        created_at: row.get("created_at"),
    }
}

pub async fn list_connections(pool: &SqlitePool, board_id: Uuid) -> Result<Vec<Connection>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, board_id, source_connector_id, target_connector_id, created_at
        FROM connections
        WHERE board_id = ?
        ORDER BY created_at ASC
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(connection_from_row).collect())
}

pub async fn get_connection(pool: &SqlitePool, connection_id: Uuid) -> Result<Option<Connection>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, board_id, source_connector_id, target_connector_id, created_at
        FROM connections
        WHERE id = ?
        "#,
    )
    .bind(connection_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(connection_from_row))
}

/// Insert a connection; endpoints must have been checked by the caller
pub async fn create_connection(pool: &SqlitePool, request: &CreateConnectionRequest) -> Result<Connection, sqlx::Error> {
    let id = request.id.unwrap_or_else(Uuid::new_v4);
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO connections (id, board_id, source_connector_id, target_connector_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(request.board_id)
    .bind(request.source_connector_id)
    .bind(request.target_connector_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Connection {
        id,
        board_id: request.board_id,
        source_connector_id: request.source_connector_id,
        target_connector_id: request.target_connector_id,
        created_at: now,
    })
}

/// Re-point a connection; returns `false` if it does not exist
pub async fn update_connection_endpoints(
    pool: &SqlitePool,
    connection_id: Uuid,
    source_connector_id: Uuid,
    target_connector_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE connections SET source_connector_id = ?, target_connector_id = ? WHERE id = ?",
    )
    .bind(source_connector_id)
    .bind(target_connector_id)
    .bind(connection_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a connection; returns the board it belonged to
pub async fn delete_connection(pool: &SqlitePool, connection_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("DELETE FROM connections WHERE id = ? RETURNING board_id")
        .bind(connection_id)
        .fetch_optional(pool)
        .await
}
