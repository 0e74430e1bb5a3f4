//! Realtime integration tests
//!
//! The hub over a real WebSocket and the REST-side notifications.

#[cfg(feature = "ssr")]
mod hub_test;
#[cfg(feature = "ssr")]
mod notify_test;
