//! Token-protected doctor endpoints. Any authenticated account may call them;
//! there is no `is_doctor` check.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::user::{DoctorView, User};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub specialty: Option<String>,
    pub email: String,
}

async fn load_user(state: &AppState, auth: AuthUser) -> Result<User, AppError> {
    state
        .store()
        .find_by_id(auth.0)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::Unauthorized)
}

/// GET /doctor/dashboard
pub async fn doctor_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = load_user(&state, auth).await?;
    Ok(Json(DashboardResponse {
        message: format!("Welcome, Dr. {}!", user.username),
        specialty: user.specialty,
        email: user.email,
    }))
}

/// GET /doctor/profile
pub async fn doctor_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DoctorView>, AppError> {
    let user = load_user(&state, auth).await?;
    Ok(Json(DoctorView::from(&user)))
}
