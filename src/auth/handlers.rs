//! Token HTTP handlers: obtain a pair, refresh an access token.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::TokenPair;
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::AppJson;

#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(required(message = "This field is required."))]
    pub username: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(required(message = "This field is required."))]
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// POST /token
pub async fn obtain_token_pair(
    State(state): State<AppState>,
    AppJson(body): AppJson<TokenRequest>,
) -> Result<Json<TokenPair>, AppError> {
    body.validate()?;
    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let user = state.credentials().authenticate(&username, &password).await?;
    let pair = state.tokens().issue_pair(user.id)?;
    Ok(Json(pair))
}

/// POST /token/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(body): AppJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    body.validate()?;
    let refresh = body.refresh.unwrap_or_default();
    let access = state.tokens().refresh(&refresh)?;
    Ok(Json(RefreshResponse { access }))
}
