//! Property-based tests

mod event_proptest;
mod node_kind_proptest;
#[cfg(feature = "ssr")]
mod protocol_proptest;
