//! Storage Module
//!
//! Persistence for accounts and bookings behind one capability contract,
//! with two interchangeable backends chosen once at startup.
//!
//! # Architecture
//!
//! - **`StorageBackend`** - The contract every backend implements
//! - **`Storage`** - The selector handlers talk to; dispatches to the
//!   configured backend and applies shared input rules (email
//!   normalization, booking validation, catalog fallback)
//! - **`sqlite`** - Local relational store
//! - **`firestore`** - Remote document store
//!
//! # Module Structure
//!
//! ```text
//! storage/
//! ├── mod.rs        - Contract, selector and exports
//! ├── error.rs      - StoreError
//! ├── fallback.rs   - Soft-failure policy for read paths
//! ├── sqlite.rs     - SQLite backend
//! └── firestore/    - Firestore backend
//! ```
//!
//! # Failure Policy
//!
//! Write paths always surface store errors. The catalog read path degrades
//! to the built-in catalog (see `fallback::OrFallback`).

pub mod error;
pub mod fallback;
pub mod firestore;
pub mod sqlite;

use std::future::Future;

pub use error::StoreError;
pub use fallback::OrFallback;
pub use firestore::{FirestoreSettings, FirestoreStore};
pub use sqlite::SqliteStore;

use crate::shared::{
    builtin_catalog, normalize_email, AppConfig, Booking, BookingRequest, NewUser, ServiceEntry,
    StorageKind, UserRecord,
};

/// Operations every storage backend provides
///
/// Emails passed in are already normalized and bookings already validated;
/// backends only persist and query.
pub trait StorageBackend: Send + Sync {
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, StoreError>> + Send;

    /// Insert a new account; `DuplicateEmail` if the email is taken
    fn create_user(
        &self,
        user: &NewUser,
    ) -> impl Future<Output = Result<UserRecord, StoreError>> + Send;

    fn create_booking(
        &self,
        booking: &Booking,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Bookings owned by `email`, latest scheduled first
    fn list_bookings_by_user(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Vec<Booking>, StoreError>> + Send;

    /// Delete only if `booking_id` exists and belongs to `owner_email`, else `NotFound`
    fn delete_booking(
        &self,
        booking_id: &str,
        owner_email: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn list_services(&self) -> impl Future<Output = Result<Vec<ServiceEntry>, StoreError>> + Send;
}

/// The backend serving this process
#[derive(Debug)]
pub enum Storage {
    Relational(SqliteStore),
    Document(FirestoreStore),
}

macro_rules! dispatch {
    ($self:ident . $method:ident ( $($arg:expr),* )) => {
        match $self {
            Storage::Relational(store) => store.$method($($arg),*).await,
            Storage::Document(store) => store.$method($($arg),*).await,
        }
    };
}

impl Storage {
    /// Connect the backend selected by `config.storage`
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        match config.storage {
            StorageKind::Relational => {
                Ok(Self::Relational(SqliteStore::connect(&config.database_url).await?))
            }
            StorageKind::Document => Ok(Self::Document(FirestoreStore::connect(&config.firebase).await?)),
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            Self::Relational(_) => StorageKind::Relational,
            Self::Document(_) => StorageKind::Document,
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let email = normalize_email(email);
        dispatch!(self.find_user_by_email(&email))
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<UserRecord, StoreError> {
        dispatch!(self.create_user(user))
    }

    /// Validate `request` and persist the resulting booking for `owner_email`
    pub async fn create_booking(
        &self,
        owner_email: &str,
        request: BookingRequest,
    ) -> Result<Booking, StoreError> {
        let booking = request.into_booking(owner_email)?;
        dispatch!(self.create_booking(&booking))?;
        Ok(booking)
    }

    pub async fn list_bookings_by_user(&self, email: &str) -> Result<Vec<Booking>, StoreError> {
        let email = normalize_email(email);
        dispatch!(self.list_bookings_by_user(&email))
    }

    pub async fn delete_booking(&self, booking_id: &str, owner_email: &str) -> Result<(), StoreError> {
        let owner_email = normalize_email(owner_email);
        dispatch!(self.delete_booking(booking_id, &owner_email))
    }

    /// The service catalog; never fails
    pub async fn list_services(&self) -> Vec<ServiceEntry> {
        let services = dispatch!(self.list_services()).or_fallback("service catalog", builtin_catalog);
        if services.is_empty() {
            return builtin_catalog();
        }
        services
    }
}
