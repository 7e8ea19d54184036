//! Application error type shared by every Jobly crate.
//!
//! An [`AppError`] pairs an HTTP status with an [`anyhow::Error`]. The core
//! only raises three kinds of failure:
//!
//! | Kind         | Constructor                  | Status |
//! |--------------|------------------------------|--------|
//! | BadInput     | [`AppError::bad_request`]    | 400    |
//! | Unauthorized | [`AppError::unauthorized`]   | 401    |
//! | NotFound     | [`AppError::not_found`]      | 404    |
//!
//! Anything else that bubbles up through `?` becomes a 500.
//!
//! # Response body
//!
//! ```json
//! { "error": { "message": "Unauthorized", "status": 401 } }
//! ```

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, Error::msg(message.into()))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, Error::msg(message.into()))
    }

    /// Message that is safe to hand back to the client.
    pub fn message(&self) -> String {
        if self.status.is_server_error() {
            return "Internal server error".to_string();
        }
        self.error.to_string()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = ?self.error, status = %self.status.as_u16(), "Request failed");
        }

        let body = Json(json!({
            "error": {
                "message": self.message(),
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
