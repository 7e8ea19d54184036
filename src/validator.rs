use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use jobly_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().filter_map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .or_else(|| Some(format!("{} is invalid", field)))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pulls the first backtick-quoted name following `marker` out of a serde
/// error message, e.g. ``missing field `title` `` gives `title`.
fn quoted_after<'a>(message: &'a str, marker: &str) -> Option<&'a str> {
    message
        .split(marker)
        .nth(1)
        .and_then(|rest| rest.strip_prefix('`'))
        .and_then(|rest| rest.split('`').next())
}

/// Turns a serde deserialization message into a client-facing error.
fn deserialize_error(message: &str, fallback: &str) -> AppError {
    if let Some(field) = quoted_after(message, "missing field ") {
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if let Some(field) = quoted_after(message, "unknown field ") {
        return AppError::bad_request(anyhow!("{} is not allowed", field));
    }

    if message.contains("invalid type") || message.contains("invalid digit") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("{}", fallback))
}

fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))
}

/// JSON body extractor that rejects unknown fields, missing fields, wrong
/// types, and `validator` rule violations with `400 Bad Request`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(anyhow!(
                        "Missing 'Content-Type: application/json' header"
                    ));
                }

                deserialize_error(&rejection.body_text(), "Invalid request body")
            })?;

        validate(&value)?;

        Ok(ValidatedJson(value))
    }
}

/// Query-string counterpart of [`ValidatedJson`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                deserialize_error(&rejection.body_text(), "Invalid query string")
            })?;

        validate(&value)?;

        Ok(ValidatedQuery(value))
    }
}

/// Path extractor whose rejections render as [`AppError`] JSON. A segment
/// that does not parse as `T` is a `400 Bad Request`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_error)?;

        Ok(ValidatedPath(value))
    }
}

fn path_error(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(_) => {
            AppError::bad_request(anyhow!("Invalid path parameter"))
        }
        other => AppError::internal_error(other.body_text()),
    }
}
