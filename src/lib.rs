//! CloudBoard - Main Library
//!
//! CloudBoard is a collaborative whiteboard: boards hold typed nodes
//! (notes, cards, link collections, images, code blocks) that are wired
//! together through connectors and connections. Edits go through a REST API
//! and are fanned out to everyone viewing the same board through a
//! SignalR-compatible WebSocket hub.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the server and the client
//!   - Board graph, node kinds, sorting applications
//!   - Hub events and shared error types
//!   - Client configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and REST handlers
//!   - SQLite persistence through `sqlx`
//!   - Collaboration hub and change notifications
//!   - Bearer token authentication
//!
//! - **`client`** - Client-side board reconciliation
//!   - REST client over `reqwest`
//!   - Debounced persistence of local edits
//!   - Application of hub events to the local board
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the `backend` module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! # #[cfg(feature = "ssr")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use cloudboard::backend::server::{create_app, ServerConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - **Server**: the hub registry lives behind `Arc<RwLock<_>>`, each socket
//!   has its own unbounded `mpsc` channel
//! - **Client**: `BoardService` keeps the board behind `Arc<RwLock<_>>` so
//!   debounced tasks and event handlers can share it

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Client library
pub mod client;
