//! Client Module
//!
//! Client-side board state for CloudBoard front ends.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs            - Module exports
//! ├── config.rs         - Server URL, bearer token, debounce windows
//! ├── error.rs          - ClientError
//! ├── api.rs            - BoardApi trait and the reqwest implementation
//! ├── debounce.rs       - Keyed cancel-and-replace timers
//! └── board_service.rs  - Local board, debounced edits, hub event application
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use cloudboard::client::{BoardService, ClientConfig, HttpBoardApi};
//!
//! # async fn example(board_id: uuid::Uuid) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?.with_token("eyJ...");
//! let app = config.app().clone();
//! let service = BoardService::new(HttpBoardApi::new(config), app);
//! service.load_board(board_id).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod board_service;
pub mod config;
pub mod debounce;
pub mod error;

pub use api::{BoardApi, HttpBoardApi};
pub use board_service::{BoardService, EditField};
pub use config::ClientConfig;
pub use debounce::Debouncer;
pub use error::{ClientError, ClientResult};
