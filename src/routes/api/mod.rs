pub mod candidates;
pub mod jobs;
pub mod parse_cv;
pub mod public;
pub mod search;
pub mod stats;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use super::AppState;

/// Success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

pub fn router(state: AppState, upload_limit_bytes: usize) -> Router {
    let api = Router::new()
        // External portals
        .route("/external-search", get(search::external_search))
        .route("/search", get(search::search_all))
        // Résumé upload
        .route(
            "/parse-cv",
            post(parse_cv::parse_cv).layer(DefaultBodyLimit::max(upload_limit_bytes)),
        )
        // Records
        .route("/candidates", get(candidates::list).post(candidates::create))
        .route("/candidates/import", post(candidates::import))
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route("/stats", get(stats::counts))
        // Public feed
        .route("/public", get(public::index))
        .route("/public/jobs", get(public::open_jobs))
        .with_state(state);

    Router::new().nest("/api", api)
}
