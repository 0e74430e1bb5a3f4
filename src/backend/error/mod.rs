//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation, JSON extractor and 404 fallback
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudboard::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::validation("Route id does not match body id"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::ApiJson;
pub use types::BackendError;

/// Result alias used by handlers and database functions
pub type BackendResult<T> = Result<T, BackendError>;
