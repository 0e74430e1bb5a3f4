/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The SQLite connection pool
 * - The collaboration hub (connection and group registry)
 * - The hub notifier used by REST handlers after writes
 * - The bearer token verifier
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and safe to share:
 * - `SqlitePool` is internally reference counted
 * - `CloudBoardHub` wraps its registry in `Arc<RwLock<..>>`
 * - `TokenVerifier` sits behind an `Arc`
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // query the database
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::TokenVerifier;
use crate::backend::hub::{CloudBoardHub, HubNotifier};

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Collaboration hub; owns the connection and board group registry
    pub hub: CloudBoardHub,

    /// Sends REST-side changes to the board groups
    ///
    /// Shares its registry with `hub`.
    pub notifier: HubNotifier,

    /// Verifies bearer tokens for REST and hub requests
    pub auth: Arc<TokenVerifier>,
}

impl AppState {
    /// Wire the hub and notifier to one shared registry
    pub fn new(db_pool: SqlitePool, auth: TokenVerifier) -> Self {
        let hub = CloudBoardHub::default();
        Self {
            db_pool,
            notifier: HubNotifier::new(hub.clone()),
            hub,
            auth: Arc::new(auth),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for CloudBoardHub {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hub.clone()
    }
}

impl FromRef<AppState> for HubNotifier {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.notifier.clone()
    }
}
