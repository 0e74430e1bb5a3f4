//! Client Error Types

use thiserror::Error;
use uuid::Uuid;

use crate::shared::config::ConfigError;
use crate::shared::error::SharedError;

/// Errors raised by the board client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Request failed: {status} - {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected type
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// A local operation referenced an entity the loaded board does not contain
    #[error("Unknown {kind} '{id}'")]
    UnknownEntity { kind: &'static str, id: Uuid },

    /// A local edit was rejected before reaching the server
    #[error("Invalid edit: {0}")]
    Validation(#[from] SharedError),

    /// No board has been loaded yet
    #[error("No board loaded")]
    NoBoard,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    pub fn unknown(kind: &'static str, id: Uuid) -> Self {
        ClientError::UnknownEntity { kind, id }
    }

    /// HTTP status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
