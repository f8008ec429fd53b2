//! Authentication Module
//!
//! Password hashing, session tokens and the account endpoints.
//!
//! # Architecture
//!
//! - **`passwords`** - bcrypt hashing and fail-closed verification
//! - **`sessions`** - JWT issuing and verification with secret rotation
//! - **`handlers`** - HTTP handlers for signup, login and the current user
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── passwords.rs    - Password hashing
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - User registration handler
//!     ├── login.rs    - User authentication handler
//!     └── me.rs       - Get current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email, password → account created → token returned
//! 2. **Login**: email, password → credentials verified → token returned
//! 3. **Me**: bearer token → verified by middleware → account returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless HS256 JWTs naming the account email
//! - Tokens expire after the configured lifetime (7 days by default)
//! - Unknown email and wrong password both return 401

/// Password hashing
pub mod passwords;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{get_me, login, signup, AuthResponse, LoginRequest, SignupRequest};
pub use passwords::PasswordHasher;
pub use sessions::{Claims, TokenService};
