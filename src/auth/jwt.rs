//! JWT issue and validation for access and refresh tokens.

use crate::config::TokenConfig;
use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub token_type: TokenKind,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Identity carried by a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Signs and checks HS256 tokens with a process-wide key. Holds no per-token state.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.signing_key.as_bytes()),
            decoding: DecodingKey::from_secret(config.signing_key.as_bytes()),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    pub fn issue_pair(&self, user_id: Uuid) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access: self.issue(user_id, TokenKind::Access)?,
            refresh: self.issue(user_id, TokenKind::Refresh)?,
        })
    }

    /// New access token for the subject of a valid refresh token.
    pub fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let identity = self.validate(refresh_token, TokenKind::Refresh)?;
        self.issue(identity.user_id, TokenKind::Access)
    }

    pub fn verify(&self, access_token: &str) -> AppResult<UserIdentity> {
        self.validate(access_token, TokenKind::Access)
    }

    fn issue(&self, user_id: Uuid, kind: TokenKind) -> AppResult<String> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: user_id.to_string(),
            token_type: kind,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().simple().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("sign token: {}", e)))
    }

    fn validate(&self, token: &str, expected: TokenKind) -> AppResult<UserIdentity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            AppError::Unauthorized
        })?;

        if data.claims.token_type != expected {
            debug!(got = ?data.claims.token_type, want = ?expected, "wrong token type");
            return Err(AppError::Unauthorized);
        }

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::Unauthorized)?;
        Ok(UserIdentity { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(access_secs: i64) -> TokenConfig {
        TokenConfig {
            signing_key: "test-jwt-secret-min-32-chars!!!!".to_string(),
            access_ttl: Duration::seconds(access_secs),
            refresh_ttl: Duration::days(1),
        }
    }

    #[test]
    fn access_token_verifies_to_its_user() {
        let tokens = TokenService::new(&config(300));
        let user_id = Uuid::new_v4();
        let pair = tokens.issue_pair(user_id).unwrap();
        assert_eq!(tokens.verify(&pair.access).unwrap().user_id, user_id);
    }

    #[test]
    fn refreshed_access_token_verifies_to_same_user() {
        let tokens = TokenService::new(&config(300));
        let user_id = Uuid::new_v4();
        let pair = tokens.issue_pair(user_id).unwrap();
        let access = tokens.refresh(&pair.refresh).unwrap();
        assert_ne!(access, pair.access);
        assert_eq!(tokens.verify(&access).unwrap().user_id, user_id);
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let tokens = TokenService::new(&config(-30));
        let pair = tokens.issue_pair(Uuid::new_v4()).unwrap();
        assert!(matches!(tokens.verify(&pair.access), Err(AppError::Unauthorized)));
        // refresh token still has its own lifetime
        assert!(tokens.refresh(&pair.refresh).is_ok());
    }

    #[test]
    fn token_types_are_not_interchangeable() {
        let tokens = TokenService::new(&config(300));
        let pair = tokens.issue_pair(Uuid::new_v4()).unwrap();
        assert!(matches!(tokens.verify(&pair.refresh), Err(AppError::Unauthorized)));
        assert!(matches!(tokens.refresh(&pair.access), Err(AppError::Unauthorized)));
    }

    #[test]
    fn foreign_signature_and_garbage_are_rejected() {
        let ours = TokenService::new(&config(300));
        let mut other_cfg = config(300);
        other_cfg.signing_key = "another-secret-that-is-32-chars-long".to_string();
        let theirs = TokenService::new(&other_cfg);

        let pair = theirs.issue_pair(Uuid::new_v4()).unwrap();
        assert!(ours.verify(&pair.access).is_err());
        assert!(ours.verify("not.a.jwt").is_err());
        assert!(ours.verify("").is_err());
    }
}
