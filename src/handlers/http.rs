//! Shared application state and the health probe.

use std::sync::Arc;

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::{CredentialService, TokenService};
use crate::db::UserStore;

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(credentials: CredentialService, tokens: TokenService) -> Self {
        Self { credentials, tokens }
    }

    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
    pub fn store(&self) -> &Arc<dyn UserStore> {
        self.credentials.store()
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "medcare-auth" })),
    )
}
