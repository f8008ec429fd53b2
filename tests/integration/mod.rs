//! Integration tests
//!
//! Tests that exercise the HTTP API and the storage backends end to end
