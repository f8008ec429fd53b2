//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, health check, static files, tracing
//! - **`api_routes`** - `/api` endpoints and the auth boundary
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint wiring
//! ```
//!
//! # Route Types
//!
//! ## API Routes
//!
//! - `GET /api/services` - Service catalog
//! - `POST /api/signup` - User registration
//! - `POST /api/login` - User login
//! - `GET /api/users/me` - Get current user
//! - `GET|POST /api/bookings` - List or create bookings
//! - `DELETE /api/bookings/{id}` - Delete a booking
//!
//! ## Other
//!
//! - `GET /health` - Liveness
//! - Anything else - static files from the configured directory
//!
//! # Example
//!
//! ```rust,ignore
//! use solzer::backend::routes::create_router;
//! use solzer::backend::server::state::AppState;
//!
//! let router = create_router(AppState::new(config, storage));
//! ```

/// Main router creation
pub mod router;

/// API endpoint wiring
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
