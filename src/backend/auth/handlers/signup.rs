/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/signup.
 *
 * # Registration Process
 *
 * 1. Require name, email and password
 * 2. Normalize the email (trim, lowercase)
 * 3. Reject an already registered email
 * 4. Hash the password using bcrypt
 * 5. Create the account (the store enforces uniqueness atomically)
 * 6. Issue a session token
 *
 * # Security
 *
 * - Passwords are hashed with the configured bcrypt cost
 * - Passwords and hashes are never returned in responses
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{present, AuthResponse, SignupRequest};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{normalize_email, NewUser};

/// Sign up handler
///
/// Creates an account and returns a token for immediate authentication.
///
/// # Arguments
///
/// * `State(state)` - Application state (storage, tokens, hasher)
/// * `payload` - Signup request containing name, email and password
///
/// # Returns
///
/// `201 Created` with the token and user view
///
/// # Errors
///
/// * `400 Bad Request` - A field is missing, or the email is already registered
/// * `503 Service Unavailable` - The storage backend failed
/// * `500 Internal Server Error` - Hashing or token signing failed
///
/// # Example Request
///
/// ```http
/// POST /api/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Ann",
///   "email": "Ann@X.com",
///   "password": "pw"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": {
///     "id": 1,
///     "name": "Ann",
///     "email": "ann@x.com",
///     "createdAt": "2024-03-01T12:00:00Z"
///   }
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let Json(request) = payload?;

    let (Some(name), Some(email), Some(password)) = (
        present(&request.name),
        present(&request.email),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        tracing::warn!("Signup rejected: missing fields");
        return Err(BackendError::missing_fields());
    };
    let email = normalize_email(email);
    tracing::info!("Signup request for {}", email);

    if state.storage.find_user_by_email(&email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::email_exists());
    }

    let password_hash = state.passwords.hash(password).map_err(BackendError::internal)?;

    let user = state
        .storage
        .create_user(&NewUser::new(name, &email, password_hash))
        .await?;

    let token = state.tokens.issue_token(&user.email).map_err(BackendError::internal)?;

    tracing::info!("User created successfully: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.view(),
        }),
    ))
}
