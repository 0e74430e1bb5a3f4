/**
 * Sorting Application Handlers
 *
 * Plain CRUD under `/api/sorting-applications`. No hub notifications:
 * sorting applications are not shown on boards.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::error::{ApiJson, BackendError, BackendResult};
use crate::shared::sorting::{SortingApplication, SortingApplicationRequest};

/// Handle list (GET /api/sorting-applications)
pub async fn list_applications(State(pool): State<SqlitePool>) -> BackendResult<Json<Vec<SortingApplication>>> {
    Ok(Json(db::list_applications(&pool).await?))
}

/// Handle fetch (GET /api/sorting-applications/{id})
pub async fn get_application(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> BackendResult<Json<SortingApplication>> {
    db::get_application(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("SortingApplication", id))
}

/// Handle creation (POST /api/sorting-applications)
pub async fn create_application(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<SortingApplicationRequest>,
) -> BackendResult<(StatusCode, Json<SortingApplication>)> {
    request.validate()?;

    let application = db::create_application(&pool, &request).await?;
    tracing::info!("[Sorting] Application {} created", application.id);
    Ok((StatusCode::CREATED, Json(application)))
}

/// Handle update (PUT /api/sorting-applications/{id})
///
/// Children in the body replace the stored ones. A body `id`, when present,
/// must match the route.
pub async fn update_application(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<SortingApplicationRequest>,
) -> BackendResult<Json<SortingApplication>> {
    if let Some(body_id) = request.id {
        crate::backend::cloudboard::handlers::ensure_matching_id(id, body_id)?;
    }
    request.validate()?;

    if !db::update_application(&pool, id, &request).await? {
        return Err(BackendError::not_found("SortingApplication", id));
    }

    db::get_application(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("SortingApplication", id))
}

/// Handle deletion (DELETE /api/sorting-applications/{id})
pub async fn delete_application(State(pool): State<SqlitePool>, Path(id): Path<Uuid>) -> BackendResult<StatusCode> {
    if !db::delete_application(&pool, id).await? {
        return Err(BackendError::not_found("SortingApplication", id));
    }
    tracing::info!("[Sorting] Application {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}
