/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by `main` beforehand):
 *
 * | Variable | Default | Meaning |
 * |---|---|---|
 * | `DATABASE_URL` | `sqlite://cloudboard.db?mode=rwc` | SQLite database |
 * | `SERVER_PORT` | `3000` | listening port |
 * | `AUTH_JWT_SECRET` | - | HS256 secret for bearer tokens |
 * | `AUTH_PUBLIC_KEY_PEM` | - | RS256 realm public key (takes precedence) |
 * | `AUTH_ISSUER` | - | expected `iss` claim |
 * | `AUTH_AUDIENCE` | - | expected `aud` claim |
 * | `CORS_ALLOWED_ORIGINS` | - | comma separated origins of the web client |
 * | `STATIC_DIR` | - | directory with the built web client |
 *
 * One of `AUTH_JWT_SECRET` / `AUTH_PUBLIC_KEY_PEM` must be set.
 */

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::backend::error::BackendError;
use crate::shared::ConfigError;

/// Default database location, created on first start
pub const DEFAULT_DATABASE_URL: &str = "sqlite://cloudboard.db?mode=rwc";

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Key material used to verify bearer tokens
#[derive(Debug, Clone, PartialEq)]
pub enum AuthKey {
    /// Shared HS256 secret
    Secret(String),
    /// PEM encoded RSA public key of the identity provider realm (RS256)
    RsaPublicKeyPem(String),
}

/// Bearer token validation settings
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    pub key: AuthKey,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AuthConfig {
    /// HS256 configuration without issuer/audience checks
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            key: AuthKey::Secret(secret.into()),
            issuer: None,
            audience: None,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub cors_allowed_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = non_empty("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let port = match non_empty("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT"))?,
            None => DEFAULT_PORT,
        };

        let key = match (non_empty("AUTH_PUBLIC_KEY_PEM"), non_empty("AUTH_JWT_SECRET")) {
            (Some(pem), _) => AuthKey::RsaPublicKeyPem(pem),
            (None, Some(secret)) => AuthKey::Secret(secret),
            (None, None) => return Err(ConfigError::MissingValue("AUTH_JWT_SECRET or AUTH_PUBLIC_KEY_PEM")),
        };

        let cors_allowed_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            port,
            auth: AuthConfig {
                key,
                issuer: non_empty("AUTH_ISSUER"),
                audience: non_empty("AUTH_AUDIENCE"),
            },
            cors_allowed_origins,
            static_dir: non_empty("STATIC_DIR").map(PathBuf::from),
        })
    }
}

/// Open the SQLite pool and run the embedded migrations
///
/// In-memory databases exist per connection, so they get a single connection
/// that is never recycled.
///
/// # Errors
///
/// Returns `BackendError::DatabaseError` if the url is invalid or the
/// database cannot be opened, and `BackendError::MigrationError` if the
/// migrations fail.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("[Database] Connecting to {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!("[Database] Connection pool created");

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("[Database] Migrations completed successfully");

    Ok(pool)
}
