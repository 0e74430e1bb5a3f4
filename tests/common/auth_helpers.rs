//! Authentication test helpers
//!
//! Mints HS256 bearer tokens the way the identity provider would, signed
//! with the secret the test server is configured with.

use chrono::Utc;
use cloudboard::backend::auth::Claims;
use jsonwebtoken::{encode, EncodingKey, Header};

/// Secret shared by the test server and the token helpers
pub const TEST_SECRET: &str = "cloudboard-test-secret";

/// A signed-in test user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub token: String,
}

impl TestUser {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            token: create_token(id, name, 3600),
        }
    }
}

/// Sign a token for `sub` that expires `ttl_seconds` from now
///
/// A negative ttl yields an already expired token.
pub fn create_token(sub: &str, name: &str, ttl_seconds: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        preferred_username: Some(name.to_lowercase()),
        name: Some(name.to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        exp: (now + ttl_seconds).max(0) as u64,
        iat: Some(now as u64),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET.as_bytes()))
        .expect("Failed to sign test token")
}

/// A token signed with a key the server does not trust
pub fn foreign_token(sub: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        preferred_username: None,
        name: None,
        email: None,
        exp: (Utc::now().timestamp() + 3600) as u64,
        iat: None,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"some-other-secret"))
        .expect("Failed to sign test token")
}
