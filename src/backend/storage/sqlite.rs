/**
 * Relational Store
 *
 * SQLite persistence through a `sqlx` pool. The schema lives in
 * `migrations/` and is applied on connect.
 *
 * # Atomicity
 *
 * - Email uniqueness is a `UNIQUE` constraint; a violating insert maps to
 *   `StoreError::DuplicateEmail`, so concurrent signups cannot both win.
 * - Deletes filter on id and owner in one statement; zero affected rows is
 *   `StoreError::NotFound` whether the booking is missing or foreign.
 */

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;

use crate::backend::storage::error::StoreError;
use crate::backend::storage::StorageBackend;
use crate::shared::{builtin_catalog, Booking, NewUser, ServiceEntry, UserId, UserRecord};

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::Numeric(row.id),
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    booking_id: String,
    user_email: String,
    service_name: String,
    date_time: NaiveDateTime,
    time: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            booking_id: row.booking_id,
            user_email: row.user_email,
            service_name: row.service_name,
            date_time: row.date_time,
            time: row.time,
            address: row.address,
            phone: row.phone,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// SQLite-backed store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url` and migrate it
    ///
    /// In-memory URLs get a single long-lived connection so every query sees
    /// the same database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };

        tracing::info!("Connecting to SQLite database...");
        let pool = pool_options.connect_with(options).await?;

        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations completed successfully");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl StorageBackend for SqliteStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, StoreError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(UserRecord {
                id: UserId::Numeric(done.last_insert_rowid()),
                name: user.name.clone(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
                created_at,
            }),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateEmail(user.email.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO bookings
                (booking_id, user_email, service_name, date_time, time, address, phone, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.booking_id)
        .bind(&booking.user_email)
        .bind(&booking.service_name)
        .bind(booking.date_time)
        .bind(&booking.time)
        .bind(&booking.address)
        .bind(&booking.phone)
        .bind(&booking.notes)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateBooking(booking.booking_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_bookings_by_user(&self, email: &str) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT booking_id, user_email, service_name, date_time, time, address, phone, notes, created_at
            FROM bookings
            WHERE user_email = ?
            ORDER BY date_time DESC, id DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn delete_booking(&self, booking_id: &str, owner_email: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM bookings WHERE booking_id = ? AND user_email = ?")
            .bind(booking_id)
            .bind(owner_email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_services(&self) -> Result<Vec<ServiceEntry>, StoreError> {
        Ok(builtin_catalog())
    }
}
