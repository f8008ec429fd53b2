/**
 * Server Configuration
 *
 * Loads the process configuration and connects the storage backend it
 * selects.
 *
 * # Error Handling
 *
 * Unlike optional integrations, storage is required: a configuration or
 * connection error aborts startup with a `StartupError`.
 */

use thiserror::Error;

use crate::backend::storage::{Storage, StoreError};
use crate::shared::{AppConfig, ConfigError};

/// Reasons the server cannot start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Read configuration from the environment
///
/// `.env` is loaded by the binary before this runs.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        "Configuration loaded: environment={:?}, storage={}, port={}",
        config.environment,
        config.storage.as_str(),
        config.port
    );
    if !config.previous_jwt_secrets.is_empty() {
        tracing::info!(
            "Accepting tokens from {} retired secret(s)",
            config.previous_jwt_secrets.len()
        );
    }
    Ok(config)
}

/// Connect the storage backend selected by `config`
pub async fn load_storage(config: &AppConfig) -> Result<Storage, StartupError> {
    tracing::info!("Connecting {} storage backend...", config.storage.as_str());
    let storage = Storage::connect(config).await.map_err(|e| {
        tracing::error!("Failed to connect storage backend: {}", e);
        e
    })?;
    tracing::info!("Storage backend ready");
    Ok(storage)
}
