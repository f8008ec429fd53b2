/**
 * Application State Management
 *
 * The state shared by every handler, plus the `FromRef` implementations
 * that let handlers extract only the part they need.
 *
 * # Thread Safety
 *
 * Nothing in here is mutated after startup. Each field is behind an `Arc`
 * (or is `Copy`), so cloning the state per request is cheap. The only
 * interior mutability lives inside the storage backends (the sqlx pool and
 * the Firestore token cache).
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use std::sync::Arc;
 * use solzer::backend::storage::Storage;
 *
 * async fn handler(State(storage): State<Arc<Storage>>) {
 *     let services = storage.list_services().await;
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::auth::sessions::TokenService;
use crate::backend::storage::Storage;
use crate::shared::AppConfig;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Process configuration, read once at startup
    pub config: Arc<AppConfig>,

    /// The storage backend selected by configuration
    pub storage: Arc<Storage>,

    /// Session token issuing and verification
    pub tokens: Arc<TokenService>,

    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(config: AppConfig, storage: Storage) -> Self {
        let tokens = TokenService::from_config(&config);
        let passwords = PasswordHasher::new(config.bcrypt_cost);
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            tokens: Arc::new(tokens),
            passwords,
        }
    }
}

impl FromRef<AppState> for Arc<Storage> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.passwords
    }
}
