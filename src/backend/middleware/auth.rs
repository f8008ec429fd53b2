/**
 * Authentication Middleware
 *
 * Protects routes that require a signed-in user. Reads the bearer token from
 * the `Authorization` header, verifies it and attaches the caller's email
 * to the request for handlers to pick up via `AuthUser`.
 *
 * # Rejections (401)
 *
 * - Header absent or not of the form `Bearer <token>`: "Authorization required"
 * - Token malformed, expired or mis-signed: "Invalid token"
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::error::types::{BackendError, AUTHORIZATION_REQUIRED, INVALID_TOKEN};
use crate::backend::server::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity established by the middleware
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Token part of a `Bearer` authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            BackendError::unauthorized(AUTHORIZATION_REQUIRED)
        })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the `Authorization` header
/// 2. Verifies it with the token service
/// 3. Attaches `AuthenticatedUser` to the request extensions
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;

    let email = app_state.tokens.verify_token(token).ok_or_else(|| {
        tracing::warn!("Rejected request with invalid token");
        BackendError::unauthorized(INVALID_TOKEN)
    })?;

    request.extensions_mut().insert(AuthenticatedUser { email });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only usable on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized(AUTHORIZATION_REQUIRED)
            })?;

        Ok(AuthUser(user))
    }
}
