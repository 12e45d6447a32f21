pub mod api;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::aggregator::Aggregator;
use crate::documents::TextExtractor;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::store::RecordStore;

/// Collaborators shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub extractor: Arc<dyn TextExtractor>,
    pub candidates: Arc<dyn RecordStore<Candidate>>,
    pub jobs: Arc<dyn RecordStore<Job>>,
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub fn app(state: AppState, upload_limit_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(api::router(state, upload_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
