//! Credential service: password hashing, registration, and username/password checks.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, info};
use validator::Validate;

use crate::db::{UserStore, DUPLICATE_USERNAME};
use crate::error::{AppError, AppResult};
use crate::models::user::{NewUser, RegistrationFields, Role, User};

#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    // Verified against when the username is unknown so both paths cost one Argon2 run.
    dummy_hash: Arc<str>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>) -> AppResult<Self> {
        let dummy_hash = Self::hash_password("medcare-timing-equalizer")?;
        Ok(Self {
            store,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
            .to_string();
        Ok(hash)
    }

    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("parse hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Validate `fields`, apply the role's flags, hash the password and insert one user.
    ///
    /// Customers always get `is_customer = true` and `is_doctor = false`. Doctors keep
    /// whatever `is_doctor` the caller sent (default false) and never get `is_customer`.
    pub async fn register(&self, role: Role, fields: RegistrationFields) -> AppResult<User> {
        fields.validate()?;

        let RegistrationFields {
            username,
            email,
            password,
            specialty,
            is_doctor,
        } = fields;
        // both are `required` above
        let (Some(username), Some(password)) = (username, password) else {
            return Err(AppError::field("username", "This field is required."));
        };

        if self.store.find_by_username(&username).await?.is_some() {
            return Err(AppError::field("username", DUPLICATE_USERNAME));
        }

        let (is_doctor, specialty, is_customer) = match role {
            Role::Doctor => (is_doctor.unwrap_or(false), specialty, false),
            Role::Customer => (false, None, true),
        };

        let password_hash = Self::hash_password(&password)?;
        let user = self
            .store
            .insert(NewUser {
                username,
                email: email.unwrap_or_default(),
                password_hash,
                is_doctor,
                specialty,
                is_customer,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = role.as_str(), "user registered");
        Ok(user)
    }

    /// Resolve a username/password pair to an active user.
    ///
    /// Unknown user, wrong password and inactive account all yield `Unauthorized`.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.store.find_by_username(username).await? else {
            let _ = Self::verify_password(password, &self.dummy_hash)?;
            debug!("login failed: unknown username");
            return Err(AppError::Unauthorized);
        };

        if !Self::verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "login failed: bad password");
            return Err(AppError::Unauthorized);
        }
        if !user.is_active {
            debug!(user_id = %user.id, "login failed: inactive account");
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }
}
