use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use tracing::debug;

use jobly_auth::{Claims, verify_token};
use jobly_config::JwtConfig;

use crate::state::AppState;

/// Identity of the caller for one request.
///
/// Built once by [`authenticate_jwt`] and stored as a request extension.
/// Anonymous when no header was sent or the token did not verify.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext(Option<Claims>);

impl AuthContext {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn authenticated(claims: Claims) -> Self {
        Self(Some(claims))
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.0.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    /// Context stored on a request, anonymous if authentication never ran.
    pub(crate) fn from_parts(parts: &Parts) -> Self {
        parts.extensions.get::<Self>().cloned().unwrap_or_default()
    }
}

/// Reads the caller's identity from the `Authorization` header.
///
/// A leading `Bearer ` or `bearer ` is stripped and the rest trimmed. A
/// missing header or a token that fails verification yields an anonymous
/// context; this never rejects.
pub fn authenticate(headers: &HeaderMap, jwt_config: &JwtConfig) -> AuthContext {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return AuthContext::anonymous();
    };

    let Ok(value) = value.to_str() else {
        debug!("Authorization header is not valid UTF-8");
        return AuthContext::anonymous();
    };

    let token = strip_bearer(value).trim();

    match verify_token(token, jwt_config) {
        Ok(claims) => AuthContext::authenticated(claims),
        Err(_) => AuthContext::anonymous(),
    }
}

fn strip_bearer(value: &str) -> &str {
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
}

/// Middleware that attaches an [`AuthContext`] to every request.
///
/// ```rust,ignore
/// Router::new()
///     .nest("/jobs", init_jobs_router())
///     .layer(middleware::from_fn_with_state(state.clone(), authenticate_jwt));
/// ```
pub async fn authenticate_jwt(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let context = authenticate(req.headers(), &state.jwt_config);

    if let Some(claims) = context.claims() {
        debug!(username = %claims.username, is_admin = claims.is_admin, "Authenticated request");
    }

    req.extensions_mut().insert(context);
    next.run(req).await
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
