//! Registration and JWT authentication backend for doctor and customer accounts.
//!
//! Users register through a role-specific endpoint, exchange credentials for an
//! access/refresh token pair, and present the access token to reach protected routes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};

/// Build the API router. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let register_routes = axum::Router::new()
        .route("/doctor", post(handlers::register_doctor))
        .route("/customer", post(handlers::register_customer));

    let doctor_routes = axum::Router::new()
        .route("/dashboard", get(handlers::doctor_dashboard))
        .route("/profile", get(handlers::doctor_profile));

    axum::Router::new()
        .route("/health", get(handlers::health))
        .nest("/register", register_routes)
        .route("/token", post(auth::obtain_token_pair))
        .route("/token/refresh", post(auth::refresh_token))
        .nest("/doctor", doctor_routes)
        .nest("/api", client_routes())
        .with_state(state)
}

/// Paths used by the existing web and mobile clients (trailing slashes included).
fn client_routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/users/register/", post(handlers::register_doctor))
        .route("/users/dashboard/", get(handlers::doctor_dashboard))
        .route("/users/profile/", get(handlers::doctor_profile))
        .route("/customers/register/", post(handlers::register_customer))
        .route("/token/", post(auth::obtain_token_pair))
        .route("/token/refresh/", post(auth::refresh_token))
}
