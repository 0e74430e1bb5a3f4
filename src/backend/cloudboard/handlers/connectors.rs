/**
 * Connector Handlers
 *
 * Connectors are part of their node's representation, so every change is
 * announced as a `NodeUpdated` carrying the node with its current connectors.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::ensure_matching_id;
use crate::backend::cloudboard::db::{connectors as db, nodes};
use crate::backend::error::{ApiJson, BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::board::{validate_name, CreateConnectorRequest, UpdateConnectorRequest};
use crate::shared::Connector;

async fn announce_node(state: &AppState, node_id: Uuid, user_id: &str) -> BackendResult<()> {
    if let Some(node) = nodes::get_node(&state.db_pool, node_id).await? {
        state.notifier.notify_node_updated(&node, user_id).await;
    }
    Ok(())
}

/// Handle connector fetch (GET /api/connector/{id})
pub async fn get_connector(
    State(pool): State<SqlitePool>,
    Path(connector_id): Path<Uuid>,
) -> BackendResult<Json<Connector>> {
    db::get_connector(&pool, connector_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("Connector", connector_id))
}

/// Handle connector creation (POST /api/connector)
///
/// # Errors
///
/// * `400 Bad Request` - invalid name or unknown node
pub async fn create_connector(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateConnectorRequest>,
) -> BackendResult<(StatusCode, Json<Connector>)> {
    validate_name("name", &request.name)?;

    if nodes::get_node(&state.db_pool, request.node_id).await?.is_none() {
        return Err(BackendError::validation(format!("Node {} does not exist", request.node_id)));
    }

    let connector = db::create_connector(&state.db_pool, &request).await?;
    tracing::debug!("[Board] Connector {} added to node {}", connector.id, connector.node_id);

    announce_node(&state, connector.node_id, &user.user_id).await?;
    Ok((StatusCode::CREATED, Json(connector)))
}

/// Handle connector update (PUT /api/connector/{id})
pub async fn update_connector(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(connector_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateConnectorRequest>,
) -> BackendResult<Json<Connector>> {
    ensure_matching_id(connector_id, request.id)?;
    validate_name("name", &request.name)?;

    if !db::update_connector(&state.db_pool, &request).await? {
        return Err(BackendError::not_found("Connector", connector_id));
    }

    let connector = db::get_connector(&state.db_pool, connector_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Connector", connector_id))?;

    announce_node(&state, connector.node_id, &user.user_id).await?;
    Ok(Json(connector))
}

/// Handle connector deletion (DELETE /api/connector/{id})
///
/// Connections attached to the connector are removed and announced.
pub async fn delete_connector(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(connector_id): Path<Uuid>,
) -> BackendResult<StatusCode> {
    let node_id = db::get_connector(&state.db_pool, connector_id)
        .await?
        .map(|c| c.node_id)
        .ok_or_else(|| BackendError::not_found("Connector", connector_id))?;

    let removal = db::delete_connector(&state.db_pool, connector_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Connector", connector_id))?;

    for connection_id in &removal.connection_ids {
        state
            .notifier
            .notify_connection_deleted(removal.board_id, *connection_id, &user.user_id)
            .await;
    }
    announce_node(&state, node_id, &user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
