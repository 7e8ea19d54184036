//! Authorization gates.
//!
//! Each gate is a pure check over an [`AuthContext`] that either yields the
//! caller's claims or fails with `401 Unauthorized`. They are exposed three
//! ways:
//!
//! 1. Plain functions (`ensure_*`) and [`authorize`] for chaining
//! 2. Extractors (`Require*`) for handlers
//! 3. Layer functions (`require_*`) for whole routers
//!
//! Extractors run before the request body is read, so a rejected caller
//! never sees a validation error.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Path, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use jobly_auth::Claims;
use jobly_core::AppError;

use crate::middleware::auth::AuthContext;

const UNAUTHORIZED: &str = "Unauthorized";

/// Passes any authenticated caller.
pub fn ensure_logged_in(ctx: &AuthContext) -> Result<&Claims, AppError> {
    ctx.claims()
        .ok_or_else(|| AppError::unauthorized(UNAUTHORIZED))
}

/// Passes only callers whose token has `isAdmin` set.
pub fn ensure_admin(ctx: &AuthContext) -> Result<&Claims, AppError> {
    match ctx.claims() {
        Some(claims) if claims.is_admin => Ok(claims),
        _ => Err(AppError::unauthorized(UNAUTHORIZED)),
    }
}

/// Passes an admin, or the user named by `route_username`.
pub fn ensure_correct_user_or_admin<'a>(
    ctx: &'a AuthContext,
    route_username: &str,
) -> Result<&'a Claims, AppError> {
    match ctx.claims() {
        Some(claims) if claims.is_admin || claims.username == route_username => Ok(claims),
        _ => Err(AppError::unauthorized(UNAUTHORIZED)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate<'a> {
    LoggedIn,
    Admin,
    CorrectUserOrAdmin(&'a str),
}

impl Gate<'_> {
    pub fn check<'c>(&self, ctx: &'c AuthContext) -> Result<&'c Claims, AppError> {
        match self {
            Gate::LoggedIn => ensure_logged_in(ctx),
            Gate::Admin => ensure_admin(ctx),
            Gate::CorrectUserOrAdmin(username) => ensure_correct_user_or_admin(ctx, username),
        }
    }
}

/// Runs `gates` in order and stops at the first one that fails.
///
/// With no gates the request is let through as-is, authenticated or not.
pub fn authorize<'c>(
    ctx: &'c AuthContext,
    gates: &[Gate<'_>],
) -> Result<Option<&'c Claims>, AppError> {
    let mut passed = ctx.claims();
    for gate in gates {
        passed = Some(gate.check(ctx)?);
    }
    Ok(passed)
}

/// Extractor for routes open to any logged-in user.
#[derive(Debug, Clone)]
pub struct RequireLoggedIn(pub Claims);

impl<S> FromRequestParts<S> for RequireLoggedIn
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = AuthContext::from_parts(parts);
        ensure_logged_in(&ctx).cloned().map(RequireLoggedIn)
    }
}

/// Extractor for admin-only routes.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Claims);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = AuthContext::from_parts(parts);
        ensure_admin(&ctx).cloned().map(RequireAdmin)
    }
}

/// Extractor for routes with a `{username}` path segment that only that
/// user or an admin may reach.
///
/// A route without a `username` parameter admits admins only.
#[derive(Debug, Clone)]
pub struct RequireCorrectUserOrAdmin(pub Claims);

impl<S> FromRequestParts<S> for RequireCorrectUserOrAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = AuthContext::from_parts(parts);

        let route_username = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Path(mut params)| params.remove("username"));

        let claims = match route_username {
            Some(username) => ensure_correct_user_or_admin(&ctx, &username)?,
            None => ensure_admin(&ctx)?,
        };

        Ok(RequireCorrectUserOrAdmin(claims.clone()))
    }
}

/// Layer function rejecting anonymous callers.
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/me", get(handler))
///     .route_layer(middleware::from_fn(require_logged_in));
/// ```
pub async fn require_logged_in(req: Request, next: Next) -> Result<Response, AppError> {
    let ctx = req.extensions().get::<AuthContext>().cloned().unwrap_or_default();
    ensure_logged_in(&ctx)?;
    Ok(next.run(req).await)
}

/// Layer function rejecting everyone but admins.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let ctx = req.extensions().get::<AuthContext>().cloned().unwrap_or_default();
    ensure_admin(&ctx)?;
    Ok(next.run(req).await)
}
