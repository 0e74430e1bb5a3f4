//! Authentication Module
//!
//! Users sign in with the external OpenID Connect provider; the server never
//! sees passwords. Every REST request and every hub connection carries an
//! access token that this module verifies.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs     - Module exports and documentation
//! └── tokens.rs  - Claims and bearer token verification
//! ```
//!
//! The request-level plumbing (middleware, extractors) lives in
//! `backend::middleware::auth`.

/// Claims and token verification
pub mod tokens;

pub use tokens::{Claims, TokenVerifier};
