//! Database integration tests

#[cfg(feature = "ssr")]
mod migrations_test;
