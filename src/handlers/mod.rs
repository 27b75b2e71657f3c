//! HTTP request handlers.

pub mod doctor;
pub mod http;
pub mod registration;

pub use doctor::{doctor_dashboard, doctor_profile};
pub use http::*;
pub use registration::{register_customer, register_doctor};
