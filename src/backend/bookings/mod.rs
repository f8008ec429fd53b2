//! Bookings Module
//!
//! HTTP endpoints for creating, listing and cancelling bookings.
//!
//! # Module Structure
//!
//! ```text
//! bookings/
//! ├── mod.rs        - Module exports
//! └── handlers.rs   - List, create and delete handlers
//! ```
//!
//! Validation and id generation live in `shared::booking`; persistence in
//! `backend::storage`.

pub mod handlers;

pub use handlers::{create_booking, delete_booking, list_bookings};
