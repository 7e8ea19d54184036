//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims carried by a bearer token.
///
/// Only `username` is required on the wire; `isAdmin` defaults to `false`.
/// Tokens this API issues also carry `iat` and, when the server is configured
/// with a token lifetime, `exp`. Any other claims in a verified payload are
/// kept in [`Claims::extra`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the caller
    pub username: String,
    /// Whether the caller may perform admin-only operations
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    /// Token issued-at timestamp (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    /// Token expiration timestamp (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool, iat: u64) -> Self {
        Self {
            username: username.into(),
            is_admin,
            iat: Some(iat),
            exp: None,
            extra: Map::new(),
        }
    }
}
