/**
 * API Route Handlers
 *
 * This module defines the `/api` endpoints:
 * - Public: service catalog, signup, login
 * - Protected: current user, bookings
 *
 * # Routes
 *
 * ## Public
 * - `GET /api/services` - Service catalog
 * - `POST /api/signup` - User registration
 * - `POST /api/login` - User login
 *
 * ## Protected (bearer token)
 * - `GET /api/users/me` - Get current user info
 * - `GET /api/bookings` - List the caller's bookings
 * - `POST /api/bookings` - Create a booking
 * - `DELETE /api/bookings/{id}` - Delete one of the caller's bookings
 */

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::{get_me, login, signup};
use crate::backend::bookings::{create_booking, delete_booking, list_bookings};
use crate::backend::catalog::list_services;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Protected routes are collected in their own router so that the auth
/// middleware, applied with `route_layer`, covers exactly those routes.
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/services", get(list_services))
        .route("/api/signup", post(signup))
        .route("/api/login", post(login));

    let protected = Router::new()
        .route("/api/users/me", get(get_me))
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/{id}", delete(delete_booking))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router.merge(public).merge(protected)
}
