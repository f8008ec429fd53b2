/**
 * Backend Error Types
 *
 * Errors returned from HTTP handlers. Every variant maps to exactly one
 * status code and carries a message that is safe to show a client.
 *
 * # Error Categories
 *
 * - `Validation` (400) - Missing fields, unparseable input
 * - `Conflict` (400) - Email already registered
 * - `Unauthorized` (401) - Missing/invalid token, wrong credentials
 * - `NotFound` (404) - Absent or foreign resource
 * - `Unavailable` (503) - The storage backend failed
 * - `Internal` (500) - Anything else
 *
 * Causes of `Unavailable` and `Internal` are logged where the error is
 * created and never reach the response body.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::storage::StoreError;
use crate::shared::SharedError;

pub const MISSING_FIELDS: &str = "Missing fields";
pub const EMAIL_EXISTS: &str = "Email already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const AUTHORIZATION_REQUIRED: &str = "Authorization required";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const NOT_FOUND: &str = "Not found";

/// Handler-facing error
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage unavailable")]
    Unavailable,

    #[error("Internal error")]
    Internal,
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound {
            message: NOT_FOUND.to_string(),
        }
    }

    pub fn missing_fields() -> Self {
        Self::validation(MISSING_FIELDS)
    }

    pub fn email_exists() -> Self {
        Self::Conflict {
            message: EMAIL_EXISTS.to_string(),
        }
    }

    /// Log `cause` and return an opaque internal error
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!("Internal error: {}", cause);
        Self::Internal
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `Conflict` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `Unavailable` - 503 Service Unavailable
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::NotFound { message } => message.clone(),
            Self::Unavailable => "Service temporarily unavailable".to_string(),
            Self::Internal => "Internal server error".to_string(),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::MissingField { .. } => Self::missing_fields(),
            SharedError::InvalidDate { .. } => Self::validation("Invalid date"),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => Self::email_exists(),
            StoreError::NotFound => Self::not_found(),
            StoreError::Invalid(shared) => shared.into(),
            e if e.is_unavailable() => {
                tracing::error!("Storage backend failure: {}", e);
                Self::Unavailable
            }
            e => Self::internal(e),
        }
    }
}
