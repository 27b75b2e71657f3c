//! Registration handlers: one per role.

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::AppJson;
use crate::models::user::{CustomerRegistration, CustomerView, DoctorRegistration, DoctorView, Role};

/// POST /register/doctor
pub async fn register_doctor(
    State(state): State<AppState>,
    AppJson(body): AppJson<DoctorRegistration>,
) -> Result<(StatusCode, Json<DoctorView>), AppError> {
    let user = state.credentials().register(Role::Doctor, body).await?;
    Ok((StatusCode::CREATED, Json(DoctorView::from(&user))))
}

/// POST /register/customer — role flags in the body are ignored.
pub async fn register_customer(
    State(state): State<AppState>,
    AppJson(body): AppJson<CustomerRegistration>,
) -> Result<(StatusCode, Json<CustomerView>), AppError> {
    let user = state
        .credentials()
        .register(Role::Customer, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(CustomerView::from(&user))))
}
