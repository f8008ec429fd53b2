//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! # Architecture
//!
//! - **`auth`** - Bearer-token authentication for protected routes
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use solzer::backend::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/api/bookings", get(list_bookings))
//!     .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));
//! ```

/// Authentication middleware
pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
