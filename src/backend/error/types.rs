/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `NotFound` - the addressed aggregate does not exist (404)
 * - `ValidationError` - the request is well formed but not acceptable, e.g.
 *   an id mismatch on update or a connection to an unknown connector (400)
 * - `Unauthorized` - missing or invalid bearer token (401)
 *
 * ## Server Errors
 *
 * - `DatabaseError` / `MigrationError` - persistence failures (500, except
 *   `RowNotFound` → 404, unique violations → 409, foreign key violations → 400)
 * - `SerializationError` - JSON failures while building responses (500)
 * - `ConfigError` - invalid server configuration at startup
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::{ConfigError, SharedError};

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use cloudboard::backend::error::BackendError;
///
/// let err = BackendError::not_found("node", "3f1c...");
/// let err = BackendError::validation("Route id does not match body id");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// The addressed aggregate does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of aggregate (board, node, ...)
        entity: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// The request was understood but rejected
    #[error("Validation error: {message}")]
    ValidationError {
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Invalid server configuration
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a not-found error for an aggregate id
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `NotFound` - 404 Not Found
    /// - `ValidationError` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `SharedError` - 400 for validation/unknown variants, 500 for serialization
    /// - `DatabaseError` - 404 for `RowNotFound`, 409 for unique violations,
    ///   400 for foreign key violations, otherwise 500
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::UnknownVariant { .. } => StatusCode::BAD_REQUEST,
            },
            Self::DatabaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::DatabaseError(sqlx::Error::Database(e)) if e.is_unique_violation() => StatusCode::CONFLICT,
            Self::DatabaseError(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                StatusCode::BAD_REQUEST
            }
            Self::DatabaseError(_)
            | Self::MigrationError(_)
            | Self::ConfigError(_)
            | Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message returned to clients
    ///
    /// Persistence errors are not described to clients; they are logged
    /// server-side when the response is built.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::ValidationError { message } => message.clone(),
            Self::Unauthorized { message } => message.clone(),
            Self::NotFound { .. } | Self::SharedError(_) => self.to_string(),
            Self::DatabaseError(sqlx::Error::RowNotFound) => "Resource not found".to_string(),
            Self::DatabaseError(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                "Resource already exists".to_string()
            }
            Self::DatabaseError(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                "Referenced resource does not exist".to_string()
            }
            Self::DatabaseError(_) | Self::MigrationError(_) => "Internal server error".to_string(),
            Self::ConfigError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}
