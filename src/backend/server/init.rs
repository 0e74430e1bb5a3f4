/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the database and run migrations
 * 2. Build the bearer token verifier
 * 3. Create the hub, notifier and `AppState`
 * 4. Create and configure the router
 *
 * A missing database or a bad auth key is fatal.
 */

use axum::Router;

use crate::backend::auth::TokenVerifier;
use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated, or if the
/// token verification key is invalid.
pub async fn create_app(config: &ServerConfig) -> Result<Router, BackendError> {
    tracing::info!("Initializing CloudBoard backend server");

    let db_pool = load_database(&config.database_url).await?;

    let verifier = TokenVerifier::new(&config.auth)?;
    tracing::info!(
        "[Auth] Token verification ready (issuer: {}, audience: {})",
        config.auth.issuer.as_deref().unwrap_or("any"),
        config.auth.audience.as_deref().unwrap_or("any")
    );

    let app_state = AppState::new(db_pool, verifier);
    let app = build_router(app_state, config);

    tracing::info!("Router configured");
    Ok(app)
}

/// Build the router around an existing state
///
/// Used by `create_app` and by tests that bring their own pool.
pub fn build_router(app_state: AppState, config: &ServerConfig) -> Router {
    create_router(app_state, &config.cors_allowed_origins, config.static_dir.as_deref())
}
