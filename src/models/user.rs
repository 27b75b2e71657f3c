//! The user record, registration payloads, and the role-specific views sent to clients.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidateEmail};

const BLANK: &str = "This field may not be blank.";
const NUL: &str = "Null characters are not allowed.";

/// Which registration endpoint created the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Doctor,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Customer => "customer",
        }
    }
}

/// A persisted user.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_doctor: bool,
    pub specialty: Option<String>,
    pub is_customer: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("is_doctor", &self.is_doctor)
            .field("specialty", &self.specialty)
            .field("is_customer", &self.is_customer)
            .field("is_active", &self.is_active)
            .field("date_joined", &self.date_joined)
            .finish()
    }
}

/// Row to insert; the store assigns `id`, `is_active` and `date_joined`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_doctor: bool,
    pub specialty: Option<String>,
    pub is_customer: bool,
}

/// Registration input. Fields are optional so that a missing field becomes a
/// field-level validation message rather than a body rejection.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegistrationFields {
    #[validate(
        required(message = "This field is required."),
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,

    #[validate(
        length(max = 254, message = "Ensure this field has no more than 254 characters."),
        custom(function = "validate_optional_email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_password")
    )]
    pub password: Option<String>,

    #[validate(
        length(max = 100, message = "Ensure this field has no more than 100 characters."),
        custom(function = "validate_no_nul")
    )]
    pub specialty: Option<String>,

    pub is_doctor: Option<bool>,
}

/// `POST /register/doctor` body.
pub type DoctorRegistration = RegistrationFields;

/// `POST /register/customer` body. Role flags sent by the client are dropped here.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerRegistration {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<CustomerRegistration> for RegistrationFields {
    fn from(c: CustomerRegistration) -> Self {
        RegistrationFields {
            username: c.username,
            email: c.email,
            password: c.password,
            specialty: None,
            is_doctor: None,
        }
    }
}

fn message(code: &'static str, text: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(text));
    err
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(message("blank", BLANK))
    } else {
        Ok(())
    }
}

/// Postgres text columns cannot hold 0x00.
fn validate_no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        Err(message("null_characters_not_allowed", NUL))
    } else {
        Ok(())
    }
}

/// Non-blank after trimming; the password itself is hashed untrimmed.
fn validate_password(password: &str) -> Result<(), ValidationError> {
    validate_not_blank(password)?;
    validate_no_nul(password)
}

/// Non-blank; letters, digits and `@ . + - _` only.
fn validate_username(username: &str) -> Result<(), ValidationError> {
    validate_not_blank(username)?;
    let ok = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if ok {
        Ok(())
    } else {
        Err(message(
            "invalid_username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ))
    }
}

/// Blank is allowed; anything else must look like an address.
fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    validate_no_nul(email)?;
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(message("invalid_email", "Enter a valid email address."))
    }
}

/// Doctor-facing representation: `{id, username, email, is_doctor, specialty}`.
#[derive(Debug, Serialize)]
pub struct DoctorView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_doctor: bool,
    pub specialty: Option<String>,
}

impl From<&User> for DoctorView {
    fn from(u: &User) -> Self {
        DoctorView {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            is_doctor: u.is_doctor,
            specialty: u.specialty.clone(),
        }
    }
}

/// Customer-facing representation: `{id, username, email}`.
#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for CustomerView {
    fn from(u: &User) -> Self {
        CustomerView {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
        }
    }
}
