//! Shared Module
//!
//! Domain types used by every layer of the service: accounts, bookings, the
//! service catalog, configuration and validation errors. Nothing here
//! depends on the HTTP server or on a particular storage backend, so the
//! module compiles without the `ssr` feature.
//!
//! # Module Structure
//!
//! ```text
//! shared/
//! ├── mod.rs      - Module exports and documentation
//! ├── error.rs    - Domain validation errors
//! ├── config/     - Application configuration
//! ├── user.rs     - Account records and public view
//! ├── booking.rs  - Bookings, request validation, date parsing
//! └── catalog.rs  - Built-in service catalog
//! ```

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Account types
pub mod user;

/// Booking types
pub mod booking;

/// Service catalog
pub mod catalog;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Environment, FirebaseConfig, StorageKind};
pub use user::{normalize_email, NewUser, UserId, UserRecord, UserView};
pub use booking::{Booking, BookingRequest};
pub use catalog::{builtin_catalog, ServiceEntry};
