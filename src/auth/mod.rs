//! Authentication: credentials, JWT access/refresh tokens, token endpoints.

mod handlers;
mod jwt;
mod service;

pub use handlers::{obtain_token_pair, refresh_token, RefreshRequest, RefreshResponse, TokenRequest};
pub use jwt::{Claims, TokenKind, TokenPair, TokenService, UserIdentity};
pub use service::CredentialService;
