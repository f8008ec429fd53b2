//! Relational store tests against an on-disk database
//!
//! Tests to ensure migrations run correctly and data survives a reconnect

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use solzer::backend::storage::{SqliteStore, StorageBackend, StoreError};
use solzer::shared::{BookingRequest, NewUser};

use crate::{assert_err, assert_ok};

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("solzer.db").display())
}

#[tokio::test]
async fn test_migrations_run_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let store = assert_ok!(SqliteStore::connect(&database_url(&dir)).await);

    for table in ["users", "bookings"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
            .execute(store.pool())
            .await;
        assert!(result.is_ok(), "{} table should exist", table);
    }
}

#[tokio::test]
async fn test_data_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = database_url(&dir);

    {
        let store = SqliteStore::connect(&url).await.unwrap();
        store
            .create_user(&NewUser::new("Ann", "ann@x.com", "hash".into()))
            .await
            .unwrap();
        let booking = BookingRequest {
            service_name: Some("Plumbing".into()),
            date: Some("2024-05-01".into()),
            ..Default::default()
        }
        .into_booking("ann@x.com")
        .unwrap();
        store.create_booking(&booking).await.unwrap();
        store.pool().close().await;
    }

    let store = assert_ok!(SqliteStore::connect(&url).await, "reopening should rerun migrations cleanly");
    let user = store.find_user_by_email("ann@x.com").await.unwrap().unwrap();
    assert_eq!(user.name, "Ann");
    assert_eq!(store.list_bookings_by_user("ann@x.com").await.unwrap().len(), 1);

    assert_err!(
        store
            .create_user(&NewUser::new("Ann", "ann@x.com", "hash".into()))
            .await,
        StoreError::DuplicateEmail(_)
    );
}
