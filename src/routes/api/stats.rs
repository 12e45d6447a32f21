use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::{ApiResponse, ok};
use crate::error::AppError;
use crate::models::candidate::CandidateFilter;
use crate::models::job::JobFilter;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct Stats {
    pub jobs: i64,
    pub open_jobs: i64,
    pub candidates: i64,
}

pub async fn counts(State(state): State<AppState>) -> Result<Json<ApiResponse<Stats>>, AppError> {
    let stats = Stats {
        jobs: state.jobs.count(&JobFilter::default()).await?,
        open_jobs: state.jobs.count(&JobFilter::open()).await?,
        candidates: state.candidates.count(&CandidateFilter::default()).await?,
    };
    Ok(ok(stats))
}
