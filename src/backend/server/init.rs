/**
 * Server Initialization
 *
 * Builds the application: connect storage, assemble state, configure
 * routes.
 *
 * # Initialization Process
 *
 * 1. Connect the storage backend selected by configuration (runs migrations
 *    for the relational store, loads credentials for the document store)
 * 2. Create `AppState` (token service, password hasher)
 * 3. Create the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_storage, StartupError};
use crate::backend::server::state::AppState;
use crate::backend::storage::Storage;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// `StartupError::Storage` when the configured backend cannot be reached.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing Solzer booking service");

    let storage = load_storage(&config).await?;
    let app = create_app_with_storage(config, storage);

    tracing::info!("Router configured");
    Ok(app)
}

/// Build the application around an already connected backend
pub fn create_app_with_storage(config: AppConfig, storage: Storage) -> Router<()> {
    create_router(AppState::new(config, storage))
}
