use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use jobly_core::AppError;
use jobly_models::{
    DeletedResponse, JobDetailResponse, JobResponse, JobSearchParams, JobsResponse, NewJobDto,
    UpdateJobDto,
};

use crate::middleware::gates::RequireAdmin;
use crate::modules::jobs::service::JobService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    post,
    path = "/jobs",
    request_body = NewJobDto,
    responses(
        (status = 201, description = "Job created successfully", body = JobResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized - requires admin")
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn create_job(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<NewJobDto>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    let job = JobService::create(state.store.as_ref(), dto).await?;

    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

#[utoipa::path(
    get,
    path = "/jobs",
    params(JobSearchParams),
    responses(
        (status = 200, description = "Jobs matching the filters, ordered by title", body = JobsResponse),
        (status = 400, description = "Unknown or invalid query parameter")
    ),
    tag = "Jobs"
)]
#[instrument(skip(state))]
pub async fn get_jobs(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<JobSearchParams>,
) -> Result<Json<JobsResponse>, AppError> {
    let jobs = JobService::find_all(state.store.as_ref(), filters).await?;

    Ok(Json(JobsResponse { jobs }))
}

#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(
        ("id" = i32, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job with its company", body = JobDetailResponse),
        (status = 400, description = "Job ID is not an integer"),
        (status = 404, description = "Job not found")
    ),
    tag = "Jobs"
)]
#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let job = JobService::get(state.store.as_ref(), id).await?;

    Ok(Json(JobDetailResponse { job }))
}

#[utoipa::path(
    patch,
    path = "/jobs/{id}",
    params(
        ("id" = i32, Path, description = "Job ID")
    ),
    request_body = UpdateJobDto,
    responses(
        (status = 200, description = "Job updated successfully", body = JobResponse),
        (status = 400, description = "Invalid input or nothing to update"),
        (status = 401, description = "Unauthorized - requires admin"),
        (status = 404, description = "Job not found")
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn update_job(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateJobDto>,
) -> Result<Json<JobResponse>, AppError> {
    let job = JobService::update(state.store.as_ref(), id, dto).await?;

    Ok(Json(JobResponse { job }))
}

#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    params(
        ("id" = i32, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job deleted successfully", body = DeletedResponse),
        (status = 400, description = "Job ID is not an integer"),
        (status = 401, description = "Unauthorized - requires admin"),
        (status = 404, description = "Job not found")
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_job(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    JobService::remove(state.store.as_ref(), id).await?;

    Ok(Json(DeletedResponse { deleted: id }))
}
