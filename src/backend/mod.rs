//! Backend Module
//!
//! This module contains all server-side code for CloudBoard: the REST API
//! over the board graph, the real-time collaboration hub and the sorting
//! application catalogue.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, database pool, application state, startup
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`cloudboard`** - Boards, nodes, connectors and connections (db + handlers)
//! - **`sorting`** - Sorting applications (db + handlers)
//! - **`hub`** - SignalR-compatible collaboration hub and notifier
//! - **`auth`** - Bearer token verification
//! - **`middleware`** - Request authentication
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── cloudboard/     - Board graph persistence and REST handlers
//! ├── sorting/        - Sorting applications
//! ├── hub/            - Real-time collaboration hub
//! ├── auth/           - Token verification
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! A REST write goes through `auth_middleware`, the handler validates and
//! writes through `sqlx`, then `HubNotifier` pushes the change to the board's
//! hub group. Hub method calls never touch the database.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Board graph persistence and handlers
pub mod cloudboard;

/// Sorting applications
pub mod sorting;

/// Real-time collaboration hub
pub mod hub;

/// Backend error types
pub mod error;

/// Bearer token verification
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
