//! Shared Types Module
//!
//! Types used by both the backend server and the client library: the board
//! model, node kinds, the sorting application aggregate, hub events, shared
//! errors and client configuration.
//!
//! Nothing in this module depends on the `ssr` feature, so the client library
//! can be built without the server stack.

/// Board, node, connector and connection types
pub mod board;

/// Typed node bodies
pub mod node_kind;

/// Sorting application aggregate
pub mod sorting;

/// Events pushed by the collaboration hub
pub mod event;

/// Shared error types
pub mod error;

/// Client configuration
pub mod config;

pub use board::{
    CloudBoard, CloudBoardSummary, Connection, Connector, ConnectorDirection, ConnectorPosition,
    Node,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use event::{HubEvent, UserIdentity};
pub use node_kind::NodeKind;
pub use sorting::SortingApplication;
