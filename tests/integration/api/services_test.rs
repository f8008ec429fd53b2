//! Catalog, health and static file tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;

use crate::common::{TestApp, INDEX_HTML};

#[tokio::test]
async fn test_services_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/services", None).await;

    assert_eq!(status, StatusCode::OK);
    let services = body["services"].as_array().unwrap();
    assert_eq!(services.len(), 14);
    assert_eq!(services[0]["id"], 1);
    assert_eq!(services[0]["name"], "House Cleaning");
    assert!(services.iter().all(|s| s["description"].is_string()));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "relational");
}

#[tokio::test]
async fn test_static_files_and_index_fallback() {
    let app = TestApp::new().await;

    let (status, bytes) = app.raw_request(Method::GET, "/app.js", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(bytes).unwrap(), "console.log('solzer');");

    let (status, bytes) = app.raw_request(Method::GET, "/my-bookings", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(bytes).unwrap(), INDEX_HTML);
}
