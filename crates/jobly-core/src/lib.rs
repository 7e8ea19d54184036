//! # Jobly Core
//!
//! Core types, errors, and utilities for the Jobly API.
//!
//! This crate provides foundational types used throughout the Jobly application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`serde`]: Custom serde deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use jobly_core::errors::AppError;
//!
//! // Create an error
//! let error = AppError::not_found(anyhow::anyhow!("No job: 42"));
//! ```

pub mod errors;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
