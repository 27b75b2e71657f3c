//! Request extractors shared by handlers.

pub mod auth;
pub mod json;

pub use auth::AuthUser;
pub use json::AppJson;
