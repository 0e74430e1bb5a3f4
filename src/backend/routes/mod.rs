//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers, fallback
//! ├── api_routes.rs   - Authenticated REST API
//! └── hub_routes.rs   - Collaboration hub endpoints
//! ```
//!
//! # Route Types
//!
//! ## API Routes
//!
//! `/api/cloudboard`, `/api/node`, `/api/connector`, `/api/connection` and
//! `/api/sorting-applications`, all behind bearer authentication.
//!
//! ## Hub Routes
//!
//! `/hubs/cloudboard` and `/hubs/cloudboard/negotiate`.
//!
//! ## Public
//!
//! `/health` and the static web client.

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

/// Hub endpoint routes
pub mod hub_routes;

pub use router::create_router;
