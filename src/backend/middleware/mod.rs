//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - bearer token authentication for REST routes and helpers the
//!   hub uses to authenticate WebSocket upgrades

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
