//! Service Catalog Module
//!
//! Public listing of bookable services.

pub mod handlers;

pub use handlers::list_services;
