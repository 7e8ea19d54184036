use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_job, delete_job, get_job, get_jobs, update_job};

pub fn init_jobs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_jobs).post(create_job))
        .route("/{id}", get(get_job).patch(update_job).delete(delete_job))
}
