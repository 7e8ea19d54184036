//! JWT (JSON Web Token) utilities for authentication.
//!
//! Tokens are signed with the shared secret from [`JwtConfig`]. A token
//! carries an `exp` claim only when [`JwtConfig::token_expiry`] is set;
//! verification checks `exp` when it is present but does not require it.
//!
//! # Example
//!
//! ```ignore
//! use jobly_auth::{create_token, verify_token};
//! use jobly_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_token("u1", false, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.username, "u1");
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use jobly_config::JwtConfig;
use jobly_core::AppError;

use crate::claims::Claims;

/// Signs a token for `username`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_token(
    username: &str,
    is_admin: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp().max(0) as u64;

    let claims = Claims {
        exp: jwt_config.token_expiry.map(|secs| now + secs as u64),
        ..Claims::new(username, is_admin, now)
    };

    sign_claims(&claims, jwt_config)
}

/// Signs an arbitrary claim set with the configured secret.
pub fn sign_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if:
/// - The token signature is invalid
/// - The token has expired
/// - The token is malformed
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AppError::unauthorized("Invalid or expired token")
    })
}
