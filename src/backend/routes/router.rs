/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. `GET /health` (public)
 * 2. API routes, wrapped in `auth_middleware`
 * 3. Hub routes (authenticate in their handlers)
 * 4. Unknown `/api/{*rest}` paths → JSON 404
 * 5. Fallback: the built web client from `STATIC_DIR`, or a JSON 404
 *
 * # Layers
 *
 * - `TraceLayer` for request spans
 * - CORS: the configured origins, or permissive when none are configured
 */

use std::path::Path;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::backend::error::conversion::not_found_fallback;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::hub_routes::configure_hub_routes;
use crate::backend::server::state::AppState;

/// Liveness probe (GET /health)
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("[Server] Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-signalr-user-agent"),
        ])
        .allow_credentials(true)
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (pool, hub, notifier, token verifier)
/// * `cors_allowed_origins` - Origins of the web client
/// * `static_dir` - Built web client to serve for unknown paths
pub fn create_router(app_state: AppState, cors_allowed_origins: &[String], static_dir: Option<&Path>) -> Router<()> {
    let api = configure_api_routes(Router::new()).route_layer(middleware::from_fn_with_state(
        app_state.clone(),
        auth_middleware,
    ));

    let router = Router::new()
        .route("/health", get(health))
        .merge(api);

    let router = configure_hub_routes(router).route("/api/{*rest}", any(not_found_fallback));

    let router = match static_dir {
        Some(dir) => {
            tracing::info!("[Server] Serving web client from {}", dir.display());
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(not_found_fallback),
    };

    router
        .layer(cors_layer(cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
