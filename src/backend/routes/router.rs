/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (catalog, auth, bookings)
 * 3. Fallback: static files, with `index.html` for unknown paths
 *
 * Every request passes through a `TraceLayer` that logs method, path,
 * status and latency.
 */

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::backend::storage::Storage;

/// Body of `GET /health`
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    /// Which storage backend this process runs on
    pub backend: &'static str,
}

pub async fn health(State(storage): State<Arc<Storage>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        backend: storage.kind().as_str(),
    })
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (config, storage, token service)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Route Details
///
/// ## Health
///
/// - `GET /health` - Liveness and active backend
///
/// ## API Routes
///
/// See `api_routes::configure_api_routes`.
///
/// ## Static Files
///
/// Everything else is served from `config.static_dir`. Paths with no
/// matching file get `index.html`, so client-side routes load the app.
pub fn create_router(app_state: AppState) -> Router<()> {
    let static_dir = app_state.config.static_dir.clone();
    let static_files =
        ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router, &app_state);

    router
        .fallback_service(static_files)
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
