//! Integration tests
//!
//! Exercise the assembled server (REST, hub, database) and the client
//! library against mocked HTTP.

pub mod api;
pub mod client;
pub mod database;
pub mod realtime;
