/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "node 3f1c... not found",
 *   "status": 404
 * }
 * ```
 *
 * Server errors (5xx) are logged with their full details before the generic
 * message is returned.
 */

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{Response, IntoResponse},
    http::StatusCode,
    Json,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("[Error] {} -> {}", self, status);
        } else {
            tracing::debug!("[Error] {} -> {}", self, status);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections use the API error format
///
/// Axum's `Json` answers malformed bodies with 422 and a plain text body;
/// the API reports every unreadable body (unknown node types, wrong property
/// shapes, missing fields) as a 400 in the usual JSON error format.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(BackendError::validation(rejection.body_text())),
        }
    }
}

/// Fallback for routes that do not exist
pub async fn not_found_fallback() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "404 Not Found")
}
