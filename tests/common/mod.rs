//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-process app on an in-memory database
//! - Authentication test helpers
//! - Custom assertion macros

#[cfg(feature = "ssr")]
pub mod app;

// Re-export commonly used utilities
#[cfg(feature = "ssr")]
pub use app::*;
pub use auth_helpers::*;
