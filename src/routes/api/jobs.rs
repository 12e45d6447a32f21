use axum::Json;
use axum::extract::{Query, State};

use super::{ApiResponse, ok};
use crate::error::AppError;
use crate::models::job::{CreateJob, Job, JobFilter};
use crate::routes::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<ApiResponse<Vec<Job>>>, AppError> {
    let jobs = state.jobs.list(&filter).await?;
    Ok(ok(jobs))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateJob>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let job = state.jobs.insert(input).await?;
    tracing::info!(id = job.id, "Job created");
    Ok(ok(job))
}
