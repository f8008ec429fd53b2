/**
 * Login Handler
 *
 * This module implements the authentication handler for POST /api/login.
 *
 * An unknown email and a wrong password produce the same 401 response, so
 * the endpoint does not reveal which accounts exist.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{present, AuthResponse, LoginRequest};
use crate::backend::error::types::{BackendError, INVALID_CREDENTIALS};
use crate::backend::server::state::AppState;
use crate::shared::normalize_email;

/// Login handler
///
/// # Arguments
///
/// * `State(state)` - Application state
/// * `payload` - Login request containing email and password
///
/// # Returns
///
/// `200 OK` with a fresh token and the user view
///
/// # Errors
///
/// * `400 Bad Request` - Email or password missing
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `503 Service Unavailable` - The storage backend failed
///
/// # Example Request
///
/// ```http
/// POST /api/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "ann@x.com",
///   "password": "pw"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    let Json(request) = payload?;

    let (Some(email), Some(password)) = (
        present(&request.email),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        tracing::warn!("Login rejected: missing fields");
        return Err(BackendError::missing_fields());
    };
    let email = normalize_email(email);

    let user = state.storage.find_user_by_email(&email).await?;
    let user = match user {
        Some(user) if state.passwords.verify(password, &user.password_hash) => user,
        _ => {
            tracing::warn!("Invalid credentials for {}", email);
            return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let token = state.tokens.issue_token(&user.email).map_err(BackendError::internal)?;

    tracing::info!("User logged in: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.view(),
    }))
}
