/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies bearer tokens from the
 * Authorization header and provides the user to handlers.
 *
 * The collaboration hub cannot rely on the header alone: browsers do not let
 * scripts set headers on WebSocket upgrades, so the hub also accepts the token
 * in the `access_token` query parameter (see `token_from_request`).
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::TokenVerifier;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::UserIdentity;

/// Authenticated user data extracted from the access token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub user_name: String,
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.user_id.clone(), self.user_name.clone())
    }
}

/// Read the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Read the token from the header, falling back to an `access_token` query value
pub fn token_from_request<'a>(headers: &'a HeaderMap, access_token: Option<&'a str>) -> Option<&'a str> {
    bearer_token(headers).or(access_token.filter(|t| !t.is_empty()))
}

/// Verify a token and turn its claims into an `AuthenticatedUser`
pub fn authenticate(verifier: &TokenVerifier, token: Option<&str>) -> Result<AuthenticatedUser, BackendError> {
    let token = token.ok_or_else(|| {
        tracing::warn!("[Auth] Missing bearer token");
        BackendError::unauthorized("Missing bearer token")
    })?;

    let claims = verifier.verify(token)?;
    Ok(AuthenticatedUser {
        user_name: claims.display_name(),
        user_id: claims.sub,
        email: claims.email,
    })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies the token
/// 3. Attaches the user to request extensions for use in handlers
///
/// Returns 401 Unauthorized if the token is missing or invalid.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(&app_state.auth, bearer_token(request.headers()))?;
    tracing::trace!("[Auth] {} {} by {}", request.method(), request.uri().path(), user.user_id);

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Not authenticated")
            })?;

        Ok(AuthUser(user))
    }
}
