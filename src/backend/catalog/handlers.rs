use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backend::storage::Storage;
use crate::shared::ServiceEntry;

#[derive(Serialize, Deserialize, Debug)]
pub struct ServicesResponse {
    pub services: Vec<ServiceEntry>,
}

/// GET /api/services
///
/// Public. Always succeeds: backend failures fall back to the built-in
/// catalog.
pub async fn list_services(State(storage): State<Arc<Storage>>) -> Json<ServicesResponse> {
    Json(ServicesResponse {
        services: storage.list_services().await,
    })
}
