//! Shared Error Types
//!
//! This module defines the domain-level error types raised while validating
//! booking and account input. They carry no transport concerns; the backend
//! maps them onto HTTP status codes.
//!
//! # Error Categories
//!
//! - `MissingField` - A required request field was absent or blank
//! - `InvalidDate` - A booking date matched none of the accepted formats
//!
//! # Usage
//!
//! ```rust
//! use solzer::shared::error::SharedError;
//!
//! let error = SharedError::missing_field("serviceName");
//! assert!(error.to_string().contains("serviceName"));
//! ```
use thiserror::Error;

/// Domain validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Required field missing or blank
    #[error("Missing required field '{field}'")]
    MissingField {
        /// Name of the field as it appears on the wire
        field: String,
    },

    /// Date input could not be parsed
    #[error("Invalid date: {input}")]
    InvalidDate {
        /// The rejected input
        input: String,
    },
}

impl SharedError {
    /// Create a missing-field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid-date error
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }
}
