//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Reads the bearer token into a per-request [`AuthContext`]
//! - [`gates`]: Authorization checks over that context
//!
//! # Authentication Flow
//!
//! 1. Client sends a request, optionally with `Authorization: Bearer <token>`
//! 2. `authenticate_jwt` verifies the token and stores an [`AuthContext`];
//!    a bad or missing token leaves the caller anonymous
//! 3. Gate extractors (`RequireAdmin`, ...) reject with 401 when the caller
//!    does not qualify
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::gates::RequireAdmin;
//!
//! async fn delete_job(RequireAdmin(claims): RequireAdmin) -> impl IntoResponse {
//!     // Only executes for tokens with isAdmin = true
//! }
//! ```
//!
//! [`AuthContext`]: auth::AuthContext

pub mod auth;
pub mod gates;
