/**
 * Authentication Handler Types
 *
 * Request and response bodies for signup, login and the current-user
 * lookup. Request fields are optional at the serde level; the handlers
 * report absent or blank fields as "Missing fields".
 */

use serde::{Deserialize, Serialize};

use crate::shared::UserView;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SignupRequest {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Email address; normalized before use
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password (hashed before storage)
    #[serde(default)]
    pub password: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Auth response
///
/// Returned by signup and login handlers.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Session token for the `Authorization: Bearer` header
    pub token: String,
    pub user: UserView,
}

/// Body of `GET /api/users/me`
#[derive(Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub user: UserView,
}

/// The trimmed value if present and non-blank
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
