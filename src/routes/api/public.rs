use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use super::{ApiResponse, ok};
use crate::error::AppError;
use crate::models::job::{Job, JobFilter};
use crate::routes::AppState;

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Hirescout Public API",
        "status": "active",
        "endpoints": {
            "jobs": "/api/public/jobs",
        },
    }))
}

/// GET /api/public/jobs
///
/// Open vacancies only, newest first.
pub async fn open_jobs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Job>>>, AppError> {
    let jobs = state.jobs.list(&JobFilter::open()).await?;
    Ok(ok(jobs))
}
