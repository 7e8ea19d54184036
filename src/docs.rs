use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use jobly_models::{
    Company, DeletedResponse, Job, JobDetail, JobDetailResponse, JobListing, JobResponse,
    JobsResponse, NewJobDto, UpdateJobDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::jobs::controller::create_job,
        crate::modules::jobs::controller::get_jobs,
        crate::modules::jobs::controller::get_job,
        crate::modules::jobs::controller::update_job,
        crate::modules::jobs::controller::delete_job,
    ),
    components(
        schemas(
            Job,
            JobListing,
            JobDetail,
            Company,
            NewJobDto,
            UpdateJobDto,
            JobResponse,
            JobDetailResponse,
            JobsResponse,
            DeletedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Jobs", description = "Job listings; writes require an admin token")
    ),
    info(
        title = "Jobly API",
        version = "0.1.0",
        description = "Job board REST API built with Rust, Axum, and PostgreSQL, secured with JWT bearer tokens.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_job_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/jobs"));
        assert!(doc.paths.paths.contains_key("/jobs/{id}"));

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
