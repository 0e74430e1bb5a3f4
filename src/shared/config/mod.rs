//! Application configuration module
//!
//! Provides the builder-based configuration used by the client library:
//! which server to talk to and how long local edits are held back before
//! they are persisted.

use std::time::Duration;

use thiserror::Error;

/// Debounce window for node position updates
pub const DEFAULT_POSITION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounce window for node property (and name) updates
pub const DEFAULT_PROPERTY_DEBOUNCE: Duration = Duration::from_millis(500);

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server URL
    pub server_url: Option<String>,
    /// Delay before a dragged node's position is persisted
    pub position_debounce: Duration,
    /// Delay before edited node properties are persisted
    pub property_debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            position_debounce: DEFAULT_POSITION_DEBOUNCE,
            property_debounce: DEFAULT_PROPERTY_DEBOUNCE,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server_url {
            let parsed =
                reqwest::Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.position_debounce.is_zero() {
            return Err(ConfigError::InvalidValue("position_debounce"));
        }
        if self.property_debounce.is_zero() {
            return Err(ConfigError::InvalidValue("property_debounce"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    position_debounce: Option<Duration>,
    property_debounce: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn position_debounce(mut self, delay: Duration) -> Self {
        self.position_debounce = Some(delay);
        self
    }

    pub fn property_debounce(mut self, delay: Duration) -> Self {
        self.property_debounce = Some(delay);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            server_url: self.server_url,
            position_debounce: self.position_debounce.unwrap_or(DEFAULT_POSITION_DEBOUNCE),
            property_debounce: self.property_debounce.unwrap_or(DEFAULT_PROPERTY_DEBOUNCE),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
}
