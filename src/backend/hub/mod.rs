//! Collaboration Hub
//!
//! Real-time fan-out between the members of a board, speaking the SignalR
//! JSON hub protocol over WebSocket.
//!
//! # Module Structure
//!
//! ```text
//! hub/
//! ├── mod.rs       - Module exports
//! ├── protocol.rs  - Framing, handshake and message types
//! ├── groups.rs    - Connection and board group registry
//! ├── methods.rs   - Client-callable methods and connection lifecycle
//! ├── notify.rs    - Server-initiated notifications for REST writes
//! └── socket.rs    - Negotiate and WebSocket endpoints
//! ```
//!
//! Each board maps to the group `Board_{boardId}`. Nothing sent through the
//! hub is persisted; only group membership lives here.

pub mod groups;
pub mod methods;
pub mod notify;
pub mod protocol;
pub mod socket;

pub use groups::{board_group, GroupRegistry};
pub use methods::{CloudBoardHub, HubInvocation};
pub use notify::HubNotifier;
pub use protocol::{HubError, HubFrame};
