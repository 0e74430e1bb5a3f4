//! CloudBoard Module
//!
//! The persistent board graph: boards own nodes, nodes own connectors, and
//! connections link two connectors of the same board.
//!
//! # Module Structure
//!
//! ```text
//! cloudboard/
//! ├── mod.rs       - Module exports
//! ├── db/          - SQLite access, one file per table
//! └── handlers/    - REST handlers, one file per resource
//! ```

pub mod db;
pub mod handlers;
