//! Solzer - Main Library
//!
//! Solzer is the backend of a home-services booking site. Customers sign up,
//! browse the service catalog and book, list and cancel appointments.
//!
//! # Module Structure
//!
//! The library is organized into two modules:
//!
//! - **`shared`** - Types that do not depend on the server stack
//!   - Accounts, bookings and the service catalog
//!   - Booking validation and schedule parsing
//!   - Configuration and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and routes
//!   - bcrypt password hashing and JWT sessions
//!   - SQLite and Firestore storage backends
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules and the server binary
//!   (on by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use solzer::backend::server::create_app;
//! use solzer::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation of user input
//! - `backend::storage::StoreError` for storage failures
//! - `backend::BackendError` for HTTP responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
