//! Board rows and full board graph loading

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{connections, nodes};
use crate::shared::{CloudBoard, CloudBoardSummary};

fn summary_from_row(row: &SqliteRow) -> CloudBoardSummary {
    CloudBoardSummary {
        id: row.get("id"),
        name: row.get("name"),
        owner: row.get("owner"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// List every board, most recently updated first
pub async fn list_boards(pool: &SqlitePool) -> Result<Vec<CloudBoardSummary>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, owner, created_at, updated_at
        FROM cloud_boards
        ORDER BY updated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(summary_from_row).collect())
}

/// Create an empty board
pub async fn create_board(pool: &SqlitePool, name: &str, owner: &str) -> Result<CloudBoard, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO cloud_boards (id, name, owner, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(owner)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(CloudBoard {
        id,
        name: name.to_string(),
        owner: owner.to_string(),
        created_at: now,
        updated_at: now,
        nodes: Vec::new(),
        connections: Vec::new(),
    })
}

pub async fn get_board_summary(pool: &SqlitePool, board_id: Uuid) -> Result<Option<CloudBoardSummary>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, owner, created_at, updated_at
        FROM cloud_boards
        WHERE id = ?
        "#,
    )
    .bind(board_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(summary_from_row))
}

/// Load a board with its nodes, their connectors and its connections
pub async fn get_board(pool: &SqlitePool, board_id: Uuid) -> Result<Option<CloudBoard>, sqlx::Error> {
    let Some(summary) = get_board_summary(pool, board_id).await? else {
        return Ok(None);
    };

    let nodes = nodes::list_nodes(pool, board_id).await?;
    let connections = connections::list_connections(pool, board_id).await?;

    Ok(Some(CloudBoard {
        id: summary.id,
        name: summary.name,
        owner: summary.owner,
        created_at: summary.created_at,
        updated_at: summary.updated_at,
        nodes,
        connections,
    }))
}

/// Rename a board; returns `false` if it does not exist
pub async fn rename_board(pool: &SqlitePool, board_id: Uuid, name: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE cloud_boards
        SET name = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(Utc::now())
    .bind(board_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a board; nodes, connectors and connections go with it
pub async fn delete_board(pool: &SqlitePool, board_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cloud_boards WHERE id = ?")
        .bind(board_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn board_exists(pool: &SqlitePool, board_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM cloud_boards WHERE id = ?")
        .bind(board_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
