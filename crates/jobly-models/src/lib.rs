//! # Jobly Models
//!
//! Domain models and DTOs for the Jobly API.
//!
//! - [`companies`]: Company records nested in job details
//! - [`jobs`]: Job records, request DTOs and response envelopes
//!
//! JSON field names are camelCase on the wire (`companyHandle`,
//! `numEmployees`); the database columns stay snake_case and are aliased in
//! the queries.

pub mod companies;
pub mod jobs;

pub use companies::Company;
pub use jobs::{
    DeletedResponse, Job, JobDetail, JobDetailResponse, JobListing, JobResponse,
    JobSearchParams, JobsResponse, NewJobDto, UpdateJobDto,
};
