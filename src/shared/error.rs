//! Shared Error Types
//!
//! This module defines error types that are shared between the client library
//! and the backend. These errors represent failures in the board model itself
//! rather than in transport or persistence.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Data validation failures (empty names, bad urls, ...)
//! - `UnknownVariant` - A stored or transmitted tag that names no known variant
//!
//! # Usage
//!
//! ```rust
//! use cloudboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("name", "Board name cannot be empty");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both the client and the backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A tag value (node type, connector position, ...) that is not recognised
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant {
        /// What kind of tag was being parsed
        kind: &'static str,
        /// The offending value
        value: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-variant error
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
