//! In-process test application
//!
//! Builds the real router on an in-memory SQLite database and drives it
//! with `tower::ServiceExt::oneshot`, so no socket is bound.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use solzer::backend::server::create_app;

use super::auth_helpers::{auth_header, test_config};

/// Contents of the `index.html` served for unknown paths
pub const INDEX_HTML: &str = "<!doctype html><title>Solzer</title>";

pub struct TestApp {
    router: Router,
    _static_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let static_dir = tempfile::tempdir().expect("Failed to create static dir");
        std::fs::write(static_dir.path().join("index.html"), INDEX_HTML)
            .expect("Failed to write index.html");
        std::fs::write(static_dir.path().join("app.js"), "console.log('solzer');")
            .expect("Failed to write app.js");

        let router = create_app(test_config(static_dir.path()))
            .await
            .expect("Failed to create test app");

        Self {
            router,
            _static_dir: static_dir,
        }
    }

    /// Send one request; the body is parsed as JSON when possible
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.raw_request(method, uri, token, body).await;
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn raw_request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, auth_header(token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Sign up and return the issued token
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/signup",
                None,
                serde_json::json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Create a booking and return its id
    pub async fn book(&self, token: &str, service: &str, date: &str) -> String {
        let (status, body) = self
            .post(
                "/api/bookings",
                Some(token),
                serde_json::json!({ "serviceName": service, "date": date }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "booking failed: {}", body);
        body["booking"]["bookingId"]
            .as_str()
            .expect("bookingId missing")
            .to_string()
    }
}
