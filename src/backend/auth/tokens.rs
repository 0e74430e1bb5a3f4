/**
 * Bearer Token Verification
 *
 * Tokens are issued by the external OpenID Connect provider; this module only
 * verifies them. Two key types are supported:
 *
 * - HS256 with a shared secret (development, tests)
 * - RS256 with the realm's PEM encoded public key (production identity provider)
 *
 * Issuer and audience are checked only when configured.
 */

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::server::config::{AuthConfig, AuthKey};
use crate::shared::{ConfigError, UserIdentity};

/// Claims read from an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the stable user id
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

impl Claims {
    /// Name shown to other board members
    ///
    /// Falls back from the full name to the username, the email and finally
    /// the subject.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .or(self.preferred_username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or(&self.sub)
            .to_string()
    }

    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.sub.clone(), self.display_name())
    }
}

/// Verifies bearer tokens against the configured key
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from the auth configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the RSA public key cannot be parsed.
    pub fn new(config: &AuthConfig) -> Result<Self, BackendError> {
        let (key, algorithm) = match &config.key {
            AuthKey::Secret(secret) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            AuthKey::RsaPublicKeyPem(pem) => {
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|_| ConfigError::InvalidValue("AUTH_PUBLIC_KEY_PEM"))?;
                (key, Algorithm::RS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer.as_str()]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience.as_str()]),
            None => validation.validate_aud = false,
        }

        Ok(Self { key, validation })
    }

    /// Verify and decode a token
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unauthorized` for expired, malformed or
    /// wrongly signed tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, BackendError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("[Auth] Token rejected: {}", e);
                BackendError::unauthorized("Invalid or expired token")
            })
    }
}
