//! # Jobly Auth
//!
//! Token claims and JWT utilities for the Jobly API.
//!
//! - [`claims`]: The payload carried by every bearer token
//! - [`jwt`]: Token signing and verification
//!
//! Tokens are HS256 and signed with [`jobly_config::JwtConfig::secret`].

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_token, verify_token};
