/**
 * Storage Error Types
 *
 * Failures common to both storage backends. Handlers never see backend
 * specifics; `BackendError` maps each variant onto an HTTP status.
 */

use thiserror::Error;

use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An account with this email already exists
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Booking id collision on insert
    #[error("booking id already exists: {0}")]
    DuplicateBooking(String),

    /// Record absent, or present but owned by someone else
    #[error("record not found")]
    NotFound,

    /// Input rejected before reaching the store
    #[error(transparent)]
    Invalid(#[from] SharedError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Document store answered with an error status
    #[error("document store returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// Document store could not be reached
    #[error("document store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("credentials error: {0}")]
    Credentials(String),

    /// Stored data did not have the expected shape
    #[error("malformed record: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials(message.into())
    }

    /// True for failures of the store itself rather than of the request
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Remote { .. } | Self::Transport(_) | Self::Credentials(_)
        )
    }
}
