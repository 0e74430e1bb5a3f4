/**
 * Node Handlers
 *
 * | Method | Path                          | Body                  |
 * |--------|-------------------------------|-----------------------|
 * | GET    | `/api/node?boardId=`          |                       |
 * | POST   | `/api/node`                   | `CreateNodeRequest`   |
 * | GET    | `/api/node/{id}`              |                       |
 * | PUT    | `/api/node/{id}`              | `UpdateNodeRequest`   |
 * | DELETE | `/api/node/{id}`              |                       |
 * | PATCH  | `/api/node/{id}/position`     | `{ "x", "y" }`        |
 * | PATCH  | `/api/node/{id}/properties`   | `NodeKind`            |
 *
 * The PATCH routes are what the client's debounced edits hit.
 *
 * Deleting a node also removes its connectors and every connection that
 * touched them; members are told about each removed connection.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::ensure_matching_id;
use crate::backend::cloudboard::db::{boards, nodes as db};
use crate::backend::error::{ApiJson, BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::board::{
    validate_name, validate_position, CreateNodeRequest, NodePositionRequest, UpdateNodeRequest,
};
use crate::shared::{Node, NodeKind};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeListQuery {
    pub board_id: Uuid,
}

async fn load_node(pool: &SqlitePool, node_id: Uuid) -> BackendResult<Node> {
    db::get_node(pool, node_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Node", node_id))
}

/// Handle node list (GET /api/node?boardId=)
pub async fn list_nodes(
    State(pool): State<SqlitePool>,
    Query(query): Query<NodeListQuery>,
) -> BackendResult<Json<Vec<Node>>> {
    if !boards::board_exists(&pool, query.board_id).await? {
        return Err(BackendError::not_found("CloudBoard", query.board_id));
    }
    Ok(Json(db::list_nodes(&pool, query.board_id).await?))
}

/// Handle node fetch (GET /api/node/{id})
pub async fn get_node(State(pool): State<SqlitePool>, Path(node_id): Path<Uuid>) -> BackendResult<Json<Node>> {
    Ok(Json(load_node(&pool, node_id).await?))
}

/// Handle node creation (POST /api/node)
///
/// # Errors
///
/// * `400 Bad Request` - invalid name, position or body, or unknown board
pub async fn create_node(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateNodeRequest>,
) -> BackendResult<(StatusCode, Json<Node>)> {
    validate_name("name", &request.name)?;
    validate_position(request.x, request.y)?;
    request.kind.validate()?;

    if !boards::board_exists(&state.db_pool, request.board_id).await? {
        return Err(BackendError::validation(format!("CloudBoard {} does not exist", request.board_id)));
    }

    let node = db::create_node(&state.db_pool, &request).await?;
    tracing::info!("[Board] Node {} created on board {}", node.id, node.board_id);

    state.notifier.notify_node_created(&node, &user.user_id).await;
    Ok((StatusCode::CREATED, Json(node)))
}

/// Handle full node update (PUT /api/node/{id})
pub async fn update_node(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(node_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateNodeRequest>,
) -> BackendResult<Json<Node>> {
    ensure_matching_id(node_id, request.id)?;
    validate_name("name", &request.name)?;
    validate_position(request.x, request.y)?;
    request.kind.validate()?;

    if !db::update_node(&state.db_pool, &request).await? {
        return Err(BackendError::not_found("Node", node_id));
    }

    let node = load_node(&state.db_pool, node_id).await?;
    state.notifier.notify_node_updated(&node, &user.user_id).await;
    Ok(Json(node))
}

/// Handle node move (PATCH /api/node/{id}/position)
pub async fn update_node_position(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(node_id): Path<Uuid>,
    ApiJson(position): ApiJson<NodePositionRequest>,
) -> BackendResult<Json<Node>> {
    validate_position(position.x, position.y)?;

    if !db::update_node_position(&state.db_pool, node_id, position.x, position.y).await? {
        return Err(BackendError::not_found("Node", node_id));
    }
    tracing::debug!("[Board] Node {} moved to ({}, {})", node_id, position.x, position.y);

    let node = load_node(&state.db_pool, node_id).await?;
    state.notifier.notify_node_updated(&node, &user.user_id).await;
    Ok(Json(node))
}

/// Handle node body replacement (PATCH /api/node/{id}/properties)
///
/// The body is a tagged `NodeKind`; the node type may change.
///
/// # Errors
///
/// * `400 Bad Request` - unknown node type or properties not matching it
pub async fn update_node_properties(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(node_id): Path<Uuid>,
    ApiJson(kind): ApiJson<NodeKind>,
) -> BackendResult<Json<Node>> {
    kind.validate()?;

    if !db::update_node_kind(&state.db_pool, node_id, &kind).await? {
        return Err(BackendError::not_found("Node", node_id));
    }

    let node = load_node(&state.db_pool, node_id).await?;
    state.notifier.notify_node_updated(&node, &user.user_id).await;
    Ok(Json(node))
}

/// Handle node deletion (DELETE /api/node/{id})
///
/// Notifies `NodeDeleted` plus one `ConnectionDeleted` per removed connection.
pub async fn delete_node(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(node_id): Path<Uuid>,
) -> BackendResult<StatusCode> {
    let removal = db::delete_node(&state.db_pool, node_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Node", node_id))?;

    tracing::info!(
        "[Board] Node {} deleted with {} connection(s)",
        node_id,
        removal.connection_ids.len()
    );

    for connection_id in &removal.connection_ids {
        state
            .notifier
            .notify_connection_deleted(removal.board_id, *connection_id, &user.user_id)
            .await;
    }
    state
        .notifier
        .notify_node_deleted(removal.board_id, node_id, &user.user_id)
        .await;

    Ok(StatusCode::NO_CONTENT)
}
