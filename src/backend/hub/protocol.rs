/**
 * Hub Wire Protocol
 *
 * JSON hub protocol (version 1) spoken by SignalR clients over WebSocket.
 *
 * # Framing
 *
 * Every message is a JSON object terminated by the record separator `0x1E`.
 * A single WebSocket text frame may carry several records.
 *
 * # Handshake
 *
 * The first record a client sends is `{"protocol":"json","version":1}`. The
 * server answers with `{}` or `{"error":"..."}` and closes on error.
 *
 * # Message Types
 *
 * | type | message    | direction                        |
 * |------|------------|----------------------------------|
 * | 1    | Invocation | both (server → client for events) |
 * | 3    | Completion | server → client                  |
 * | 6    | Ping       | both                             |
 * | 7    | Close      | both                             |
 *
 * Streaming messages (2, 4, 5) are not supported.
 */

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::shared::{HubEvent, SharedError};

/// Record separator terminating every protocol message
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// Only protocol the hub speaks
pub const PROTOCOL_NAME: &str = "json";

/// Only protocol version the hub speaks
pub const PROTOCOL_VERSION: u32 = 1;

/// Interval between server keep-alive pings
pub const PING_INTERVAL: Duration = Duration::from_secs(15);

const INVOCATION: u8 = 1;
const COMPLETION: u8 = 3;
const PING: u8 = 6;
const CLOSE: u8 = 7;

/// Hub protocol and invocation errors
///
/// These never reach other board members; they are reported to the caller
/// as completion or handshake errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HubError {
    #[error("Invalid hub message: {0}")]
    Protocol(String),

    #[error("Unsupported protocol '{protocol}' version {version}")]
    UnsupportedProtocol { protocol: String, version: u32 },

    #[error("Unsupported message type {0}")]
    UnsupportedMessageType(u8),

    #[error("Unknown hub method '{0}'")]
    UnknownMethod(String),

    #[error("Invalid arguments for '{method}': {message}")]
    InvalidArguments { method: String, message: String },

    #[error("Failed to encode hub event: {0}")]
    Encoding(#[from] SharedError),
}

impl HubError {
    pub fn invalid_arguments(method: &str, message: impl Into<String>) -> Self {
        HubError::InvalidArguments {
            method: method.to_string(),
            message: message.into(),
        }
    }
}

/// A decoded hub protocol message
#[derive(Debug, Clone, PartialEq)]
pub enum HubFrame {
    Invocation {
        invocation_id: Option<String>,
        target: String,
        arguments: Vec<Value>,
    },
    Completion {
        invocation_id: String,
        result: Option<Value>,
        error: Option<String>,
    },
    Ping,
    Close {
        error: Option<String>,
        allow_reconnect: bool,
    },
}

/// Flat wire representation shared by all message types
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFrame {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    invocation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_reconnect: Option<bool>,
}

impl HubFrame {
    /// Server → client invocation carrying a board event
    pub fn event(event: &HubEvent) -> Result<Self, HubError> {
        Ok(HubFrame::Invocation {
            invocation_id: None,
            target: event.target().to_string(),
            arguments: vec![event.payload()?],
        })
    }

    /// Successful completion without a return value
    pub fn completion(invocation_id: impl Into<String>) -> Self {
        HubFrame::Completion {
            invocation_id: invocation_id.into(),
            result: None,
            error: None,
        }
    }

    pub fn completion_error(invocation_id: impl Into<String>, error: &HubError) -> Self {
        HubFrame::Completion {
            invocation_id: invocation_id.into(),
            result: None,
            error: Some(error.to_string()),
        }
    }

    /// Serialize to a record-separator terminated string
    pub fn encode(&self) -> String {
        let wire = match self {
            HubFrame::Invocation { invocation_id, target, arguments } => WireFrame {
                kind: INVOCATION,
                invocation_id: invocation_id.clone(),
                target: Some(target.clone()),
                arguments: Some(arguments.clone()),
                ..Default::default()
            },
            HubFrame::Completion { invocation_id, result, error } => WireFrame {
                kind: COMPLETION,
                invocation_id: Some(invocation_id.clone()),
                result: result.clone(),
                error: error.clone(),
                ..Default::default()
            },
            HubFrame::Ping => WireFrame {
                kind: PING,
                ..Default::default()
            },
            HubFrame::Close { error, allow_reconnect } => WireFrame {
                kind: CLOSE,
                error: error.clone(),
                allow_reconnect: Some(*allow_reconnect),
                ..Default::default()
            },
        };

        // WireFrame holds only strings, numbers and JSON values
        let mut encoded = serde_json::to_string(&wire).unwrap_or_else(|_| format!("{{\"type\":{}}}", wire.kind));
        encoded.push(RECORD_SEPARATOR);
        encoded
    }

    /// Parse a single record (without its separator)
    pub fn parse(record: &str) -> Result<Self, HubError> {
        let wire: WireFrame =
            serde_json::from_str(record).map_err(|e| HubError::Protocol(e.to_string()))?;

        match wire.kind {
            INVOCATION => {
                let target = wire
                    .target
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| HubError::Protocol("invocation without target".to_string()))?;
                Ok(HubFrame::Invocation {
                    invocation_id: wire.invocation_id,
                    target,
                    arguments: wire.arguments.unwrap_or_default(),
                })
            }
            COMPLETION => {
                let invocation_id = wire
                    .invocation_id
                    .ok_or_else(|| HubError::Protocol("completion without invocationId".to_string()))?;
                Ok(HubFrame::Completion {
                    invocation_id,
                    result: wire.result,
                    error: wire.error,
                })
            }
            PING => Ok(HubFrame::Ping),
            CLOSE => Ok(HubFrame::Close {
                error: wire.error,
                allow_reconnect: wire.allow_reconnect.unwrap_or(false),
            }),
            other => Err(HubError::UnsupportedMessageType(other)),
        }
    }
}

/// Split a text frame into its records, dropping the empty tail
pub fn split_records(text: &str) -> impl Iterator<Item = &str> {
    text.split(RECORD_SEPARATOR).filter(|record| !record.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct HandshakeRequest {
    protocol: String,
    version: u32,
}

/// Validate the client's handshake record
pub fn parse_handshake(record: &str) -> Result<(), HubError> {
    let request: HandshakeRequest =
        serde_json::from_str(record).map_err(|e| HubError::Protocol(format!("invalid handshake: {}", e)))?;

    if request.protocol != PROTOCOL_NAME || request.version != PROTOCOL_VERSION {
        return Err(HubError::UnsupportedProtocol {
            protocol: request.protocol,
            version: request.version,
        });
    }
    Ok(())
}

/// Handshake answer, `{}` on success
pub fn handshake_response(result: &Result<(), HubError>) -> String {
    let mut response = match result {
        Ok(()) => "{}".to_string(),
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    };
    response.push(RECORD_SEPARATOR);
    response
}
