//! Sorting Applications
//!
//! Independent CRUD aggregate describing material sorting processes.
//!
//! - **`db`** - SQLite access
//! - **`handlers`** - REST handlers

pub mod db;
pub mod handlers;
