//! Backend Module
//!
//! This module contains all server-side code for the Solzer booking service:
//! an Axum HTTP server in front of one of two interchangeable storage
//! backends.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, session tokens, account handlers
//! - **`bookings`** - Booking handlers
//! - **`catalog`** - Service catalog handler
//! - **`storage`** - Relational (SQLite) and document (Firestore) stores
//! - **`middleware`** - Bearer token authentication
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── bookings/       - Booking endpoints
//! ├── catalog/        - Service catalog endpoint
//! ├── storage/        - Storage backends
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the storage backend, the token
//! service and the password hasher. None of it changes after startup, so it
//! is shared with `Arc` and no locks.
//!
//! # Storage Selection
//!
//! `USE_FIREBASE` picks the backend once at startup:
//!
//! - unset/false: SQLite at `DATABASE_URL`, migrated on connect
//! - true: Firestore over REST, authenticated with a service account
//!   (or anonymous against the emulator)
//!
//! Handlers only see `storage::Storage` and cannot tell which one is active.
//!
//! # Error Handling
//!
//! - `StoreError` for storage failures
//! - `BackendError` for everything a handler can return; it renders as
//!   `{"error": ..., "status": ...}` with the matching status code
//!
//! # Example
//!
//! ```rust,no_run
//! use solzer::backend::server::create_app;
//! use solzer::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Storage backends
#[cfg(feature = "ssr")]
pub mod storage;

/// Booking endpoints
#[cfg(feature = "ssr")]
pub mod bookings;

/// Service catalog endpoint
#[cfg(feature = "ssr")]
pub mod catalog;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use server::create_app;
#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use storage::{Storage, StoreError};
