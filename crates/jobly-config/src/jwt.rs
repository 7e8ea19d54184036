//! JWT configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC secret used to sign and verify tokens
//! - `JWT_TOKEN_EXPIRY`: token lifetime in seconds; when unset, tokens carry
//!   no `exp` claim and never expire

use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry: Option<i64>,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "secret-dev".to_string()),
            token_expiry: env::var("JWT_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs: &i64| *secs > 0),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_expiry: None,
        }
    }
}
