//! Document store tests against a mocked Firestore REST API

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use solzer::backend::storage::firestore::auth::{ServiceAccount, ServiceAccountKey, TokenSource};
use solzer::backend::storage::{
    FirestoreSettings, FirestoreStore, Storage, StorageBackend, StoreError,
};
use solzer::shared::{BookingRequest, NewUser, UserId};

use crate::assert_ok;

const ROOT: &str = "/projects/test/databases/(default)/documents";
const UPDATE_TIME: &str = "2024-03-01T12:00:00.000000Z";
const TEST_KEY: &str = include_str!("../../fixtures/test_rsa_key.pem");

fn store(server: &MockServer) -> FirestoreStore {
    FirestoreStore::new(FirestoreSettings {
        base_url: server.uri(),
        project_id: "test".into(),
        auth: TokenSource::Static("test-token".into()),
    })
    .unwrap()
}

fn user_document(email: &str) -> Value {
    json!({
        "name": format!("projects/test/databases/(default)/documents/users/{}", email),
        "fields": {
            "name": { "stringValue": "Ann" },
            "email": { "stringValue": email },
            "password_hash": { "stringValue": "$2b$04$abcdefghijklmnopqrstuu" },
            "createdAt": { "stringValue": "2024-03-01T12:00:00" },
        },
        "updateTime": UPDATE_TIME,
    })
}

fn booking_document(id: &str, owner: &str, service: &str, date_time: &str) -> Value {
    json!({
        "name": format!("projects/test/databases/(default)/documents/bookings/{}", id),
        "fields": {
            "bookingId": { "stringValue": id },
            "userEmail": { "stringValue": owner },
            "serviceName": { "stringValue": service },
            "dateTime": { "stringValue": date_time },
            "time": { "nullValue": null },
            "createdAt": { "stringValue": "2024-03-01T12:00:00.000000Z" },
        },
        "updateTime": UPDATE_TIME,
    })
}

fn already_exists() -> ResponseTemplate {
    ResponseTemplate::new(409).set_body_json(json!({
        "error": { "code": 409, "message": "Document already exists", "status": "ALREADY_EXISTS" }
    }))
}

#[tokio::test]
async fn test_find_user_by_email() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/users/ann@x.com", ROOT)))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_document("ann@x.com")))
        .mount(&server)
        .await;

    let user = assert_ok!(store(&server).find_user_by_email("ann@x.com").await).unwrap();

    assert_eq!(user.id, UserId::Key("ann@x.com".into()));
    assert_eq!(user.name, "Ann");
    assert_eq!(user.email, "ann@x.com");
}

#[tokio::test]
async fn test_missing_user_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/users/nobody@x.com", ROOT)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "not found", "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let user = assert_ok!(store(&server).find_user_by_email("nobody@x.com").await);

    assert!(user.is_none());
}

#[tokio::test]
async fn test_create_user_uses_email_as_document_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/users", ROOT)))
        .and(query_param("documentId", "ann@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_document("ann@x.com")))
        .expect(1)
        .mount(&server)
        .await;

    let user = assert_ok!(
        store(&server)
            .create_user(&NewUser::new("Ann", "ann@x.com", "$2b$04$hash".into()))
            .await
    );

    assert_eq!(user.email, "ann@x.com");
}

#[tokio::test]
async fn test_create_user_conflict_is_duplicate_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/users", ROOT)))
        .respond_with(already_exists())
        .mount(&server)
        .await;

    let result = store(&server)
        .create_user(&NewUser::new("Ann", "ann@x.com", "$2b$04$hash".into()))
        .await;

    assert_matches!(result, Err(StoreError::DuplicateEmail(email)) if email == "ann@x.com");
}

#[tokio::test]
async fn test_create_booking_through_storage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/bookings", ROOT)))
        .and(body_string_contains("\"userEmail\":{\"stringValue\":\"ann@x.com\"}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_document(
            "BOOK-0123456789",
            "ann@x.com",
            "Plumbing",
            "2024-05-01T10:00:00",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Storage::Document(store(&server));
    let request = BookingRequest {
        service_name: Some("Plumbing".into()),
        date: Some("2024-05-01T10:00".into()),
        ..Default::default()
    };

    let booking = assert_ok!(storage.create_booking(" Ann@X.com", request).await);

    assert_eq!(booking.user_email, "ann@x.com");
    assert_eq!(booking.service_name, "Plumbing");
}

#[tokio::test]
async fn test_create_booking_remote_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/bookings", ROOT)))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend down"))
        .mount(&server)
        .await;

    let storage = Storage::Document(store(&server));
    let request = BookingRequest {
        service_name: Some("Plumbing".into()),
        date: Some("2024-05-01".into()),
        ..Default::default()
    };

    let result = storage.create_booking("ann@x.com", request).await;

    assert_matches!(result, Err(StoreError::Remote { status: 503, .. }));
    assert!(result.unwrap_err().is_unavailable());
}

#[tokio::test]
async fn test_list_bookings_sorted_by_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}:runQuery", ROOT)))
        .and(body_string_contains("\"op\":\"EQUAL\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "document": booking_document("BOOK-A", "ann@x.com", "Plumbing", "2024-05-01T10:00:00") },
            { "document": booking_document("BOOK-B", "ann@x.com", "Gardening", "2024-06-01T00:00:00") },
            { "document": booking_document("BOOK-C", "ann@x.com", "Painting", "2024-05-15T09:30:00") },
            { "readTime": UPDATE_TIME },
        ])))
        .mount(&server)
        .await;

    let bookings = assert_ok!(store(&server).list_bookings_by_user("ann@x.com").await);

    let ids: Vec<&str> = bookings.iter().map(|b| b.booking_id.as_str()).collect();
    assert_eq!(ids, vec!["BOOK-B", "BOOK-C", "BOOK-A"]);
    assert_eq!(bookings[0].time, None);
}

#[tokio::test]
async fn test_delete_by_non_owner_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/bookings/BOOK-A", ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_document(
            "BOOK-A",
            "ann@x.com",
            "Plumbing",
            "2024-05-01T10:00:00",
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = store(&server).delete_booking("BOOK-A", "bob@x.com").await;

    assert_matches!(result, Err(StoreError::NotFound));
}

#[tokio::test]
async fn test_delete_by_owner_uses_update_time_precondition() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/bookings/BOOK-A", ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_document(
            "BOOK-A",
            "ann@x.com",
            "Plumbing",
            "2024-05-01T10:00:00",
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/bookings/BOOK-A", ROOT)))
        .and(query_param("currentDocument.updateTime", UPDATE_TIME))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(store(&server).delete_booking("BOOK-A", "ann@x.com").await);
}

#[tokio::test]
async fn test_delete_after_concurrent_change_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/bookings/BOOK-A", ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_document(
            "BOOK-A",
            "ann@x.com",
            "Plumbing",
            "2024-05-01T10:00:00",
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "update time mismatch", "status": "FAILED_PRECONDITION" }
        })))
        .mount(&server)
        .await;

    let result = store(&server).delete_booking("BOOK-A", "ann@x.com").await;

    assert_matches!(result, Err(StoreError::NotFound));
}

#[tokio::test]
async fn test_delete_missing_booking_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = store(&server).delete_booking("BOOK-Z", "ann@x.com").await;

    assert_matches!(result, Err(StoreError::NotFound));
}

#[tokio::test]
async fn test_delete_with_path_like_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let store = store(&server);
    for id in ["", ".", "..", "a/b"] {
        let result = store.delete_booking(id, "ann@x.com").await;
        assert_matches!(result, Err(StoreError::NotFound));
    }
}

#[tokio::test]
async fn test_services_from_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/services", ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {
                    "name": "projects/test/databases/(default)/documents/services/b",
                    "fields": {
                        "id": { "integerValue": "2" },
                        "name": { "stringValue": "Plumbing" },
                        "description": { "stringValue": "Pipes" },
                    }
                },
                {
                    "name": "projects/test/databases/(default)/documents/services/a",
                    "fields": {
                        "id": { "integerValue": "1" },
                        "name": { "stringValue": "Cleaning" },
                    }
                },
            ]
        })))
        .mount(&server)
        .await;

    let services = Storage::Document(store(&server)).list_services().await;

    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Cleaning", "Plumbing"]);
    assert_eq!(services[0].description, "");
}

#[tokio::test]
async fn test_services_fall_back_when_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/services", ROOT)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let services = Storage::Document(store(&server)).list_services().await;

    assert_eq!(services, solzer::shared::builtin_catalog());
}

#[tokio::test]
async fn test_services_fall_back_when_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/services", ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let services = Storage::Document(store(&server)).list_services().await;

    assert_eq!(services.len(), 14);
}

#[tokio::test]
async fn test_service_account_token_is_exchanged_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.exchanged",
            "expires_in": 3600,
            "token_type": "Bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/users/ann@x.com", ROOT)))
        .and(header("authorization", "Bearer ya29.exchanged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_document("ann@x.com")))
        .expect(2)
        .mount(&server)
        .await;

    let key = ServiceAccountKey {
        project_id: "test".into(),
        client_email: "svc@test.iam.gserviceaccount.com".into(),
        private_key: TEST_KEY.into(),
        token_uri: format!("{}/token", server.uri()),
    };
    let store = FirestoreStore::new(FirestoreSettings {
        base_url: server.uri(),
        project_id: "test".into(),
        auth: TokenSource::ServiceAccount(ServiceAccount::new(key).unwrap()),
    })
    .unwrap();

    assert_ok!(store.find_user_by_email("ann@x.com").await);
    assert_ok!(store.find_user_by_email("ann@x.com").await);
}

#[tokio::test]
async fn test_failed_token_exchange_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let key = ServiceAccountKey {
        project_id: "test".into(),
        client_email: "svc@test.iam.gserviceaccount.com".into(),
        private_key: TEST_KEY.into(),
        token_uri: format!("{}/token", server.uri()),
    };
    let store = FirestoreStore::new(FirestoreSettings {
        base_url: server.uri(),
        project_id: "test".into(),
        auth: TokenSource::ServiceAccount(ServiceAccount::new(key).unwrap()),
    })
    .unwrap();

    let err = store.find_user_by_email("ann@x.com").await.unwrap_err();

    assert_matches!(err, StoreError::Credentials(_));
    assert!(err.is_unavailable());
}
