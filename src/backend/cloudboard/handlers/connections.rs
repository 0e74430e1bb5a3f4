/**
 * Connection Handlers
 *
 * A connection links two connectors of the same board. Both endpoints are
 * checked before writing: an unknown connector, or one whose node sits on
 * another board, is rejected with 400.
 *
 * Re-pointing a connection (PUT) is announced as `ConnectionCreated`, which
 * clients apply as an upsert.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::ensure_matching_id;
use crate::backend::cloudboard::db::{boards, connections as db, connectors};
use crate::backend::error::{ApiJson, BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::board::{CreateConnectionRequest, UpdateConnectionRequest};
use crate::shared::Connection;

/// Check that a connector exists and belongs to `board_id`
async fn ensure_connector_on_board(pool: &SqlitePool, connector_id: Uuid, board_id: Uuid) -> BackendResult<()> {
    match connectors::connector_board_id(pool, connector_id).await? {
        Some(owner) if owner == board_id => Ok(()),
        Some(_) => Err(BackendError::validation(format!(
            "Connector {} is not on board {}",
            connector_id, board_id
        ))),
        None => Err(BackendError::validation(format!("Connector {} does not exist", connector_id))),
    }
}

/// Handle connection fetch (GET /api/connection/{id})
pub async fn get_connection(
    State(pool): State<SqlitePool>,
    Path(connection_id): Path<Uuid>,
) -> BackendResult<Json<Connection>> {
    db::get_connection(&pool, connection_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("Connection", connection_id))
}

/// Handle connection creation (POST /api/connection)
///
/// # Errors
///
/// * `400 Bad Request` - unknown board, unknown connector, or a connector on
///   another board
pub async fn create_connection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateConnectionRequest>,
) -> BackendResult<(StatusCode, Json<Connection>)> {
    if !boards::board_exists(&state.db_pool, request.board_id).await? {
        return Err(BackendError::validation(format!("CloudBoard {} does not exist", request.board_id)));
    }
    ensure_connector_on_board(&state.db_pool, request.source_connector_id, request.board_id).await?;
    ensure_connector_on_board(&state.db_pool, request.target_connector_id, request.board_id).await?;

    let connection = db::create_connection(&state.db_pool, &request).await?;
    tracing::info!(
        "[Board] Connection {} created ({} -> {})",
        connection.id,
        connection.source_connector_id,
        connection.target_connector_id
    );

    state.notifier.notify_connection_created(&connection, &user.user_id).await;
    Ok((StatusCode::CREATED, Json(connection)))
}

/// Handle connection update (PUT /api/connection/{id})
pub async fn update_connection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(connection_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateConnectionRequest>,
) -> BackendResult<Json<Connection>> {
    ensure_matching_id(connection_id, request.id)?;

    let existing = db::get_connection(&state.db_pool, connection_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Connection", connection_id))?;
    ensure_connector_on_board(&state.db_pool, request.source_connector_id, existing.board_id).await?;
    ensure_connector_on_board(&state.db_pool, request.target_connector_id, existing.board_id).await?;

    if !db::update_connection_endpoints(
        &state.db_pool,
        connection_id,
        request.source_connector_id,
        request.target_connector_id,
    )
    .await?
    {
        return Err(BackendError::not_found("Connection", connection_id));
    }

    let connection = Connection {
        source_connector_id: request.source_connector_id,
        target_connector_id: request.target_connector_id,
        ..existing
    };
    state.notifier.notify_connection_created(&connection, &user.user_id).await;
    Ok(Json(connection))
}

/// Handle connection deletion (DELETE /api/connection/{id})
pub async fn delete_connection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(connection_id): Path<Uuid>,
) -> BackendResult<StatusCode> {
    let board_id = db::delete_connection(&state.db_pool, connection_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Connection", connection_id))?;

    state
        .notifier
        .notify_connection_deleted(board_id, connection_id, &user.user_id)
        .await;
    Ok(StatusCode::NO_CONTENT)
}
