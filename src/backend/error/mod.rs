//! Backend Error Module
//!
//! Error types returned by HTTP handlers and their conversion into JSON
//! error responses.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError`, its constructors and the mapping from
//!   domain (`SharedError`) and storage (`StoreError`) failures
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use solzer::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::missing_fields())
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
