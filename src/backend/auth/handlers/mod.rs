//! Authentication Handlers Module
//!
//! HTTP handlers for account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/signup - User registration
//! - **`login`** - POST /api/login - User authentication
//! - **`get_me`** - GET /api/users/me - Current user info

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, MeResponse, SignupRequest};

// Re-export handlers
pub use login::login;
pub use me::get_me;
pub use signup::signup;
