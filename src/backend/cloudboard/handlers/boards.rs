/**
 * Board Handlers
 *
 * CRUD for boards under `/api/cloudboard`.
 *
 * | Method | Path                    | Result                    |
 * |--------|-------------------------|---------------------------|
 * | GET    | `/api/cloudboard`       | board summaries           |
 * | POST   | `/api/cloudboard`       | 201 with the new board    |
 * | GET    | `/api/cloudboard/{id}`  | full board graph          |
 * | PUT    | `/api/cloudboard/{id}`  | renamed board             |
 * | DELETE | `/api/cloudboard/{id}`  | 204                       |
 *
 * Deleting a board removes its nodes, connectors and connections.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::ensure_matching_id;
use crate::backend::cloudboard::db::boards as db;
use crate::backend::error::{ApiJson, BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::board::{validate_name, CreateCloudBoardRequest, UpdateCloudBoardRequest};
use crate::shared::{CloudBoard, CloudBoardSummary};

/// Handle board list (GET /api/cloudboard)
pub async fn list_boards(State(pool): State<SqlitePool>) -> BackendResult<Json<Vec<CloudBoardSummary>>> {
    let boards = db::list_boards(&pool).await?;
    tracing::debug!("[Board] Listed {} boards", boards.len());
    Ok(Json(boards))
}

/// Handle board creation (POST /api/cloudboard)
///
/// The caller becomes the board's owner.
///
/// # Errors
///
/// * `400 Bad Request` - empty or overlong name
pub async fn create_board(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateCloudBoardRequest>,
) -> BackendResult<(StatusCode, Json<CloudBoard>)> {
    validate_name("name", &request.name)?;

    let board = db::create_board(&pool, request.name.trim(), &user.user_id).await?;
    tracing::info!("[Board] {} created board {}", user.user_id, board.id);

    Ok((StatusCode::CREATED, Json(board)))
}

/// Handle board fetch (GET /api/cloudboard/{id})
///
/// Returns the board with every node (and its connectors) and connection.
pub async fn get_board(State(pool): State<SqlitePool>, Path(board_id): Path<Uuid>) -> BackendResult<Json<CloudBoard>> {
    db::get_board(&pool, board_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("CloudBoard", board_id))
}

/// Handle board rename (PUT /api/cloudboard/{id})
///
/// # Errors
///
/// * `400 Bad Request` - body id differs from the route id, or invalid name
/// * `404 Not Found` - board does not exist
pub async fn update_board(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateCloudBoardRequest>,
) -> BackendResult<Json<CloudBoard>> {
    ensure_matching_id(board_id, request.id)?;
    validate_name("name", &request.name)?;

    if !db::rename_board(&state.db_pool, board_id, request.name.trim()).await? {
        return Err(BackendError::not_found("CloudBoard", board_id));
    }

    let board = db::get_board(&state.db_pool, board_id)
        .await?
        .ok_or_else(|| BackendError::not_found("CloudBoard", board_id))?;

    state.notifier.notify_cloudboard_updated(&board, &user.user_id).await;
    Ok(Json(board))
}

/// Handle board deletion (DELETE /api/cloudboard/{id})
pub async fn delete_board(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> BackendResult<StatusCode> {
    if !db::delete_board(&state.db_pool, board_id).await? {
        return Err(BackendError::not_found("CloudBoard", board_id));
    }
    tracing::info!("[Board] {} deleted board {}", user.user_id, board_id);

    state.notifier.notify_cloudboard_deleted(board_id, &user.user_id).await;
    Ok(StatusCode::NO_CONTENT)
}
