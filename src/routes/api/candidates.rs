use axum::Json;
use axum::extract::{Query, State};

use super::{ApiResponse, ok};
use crate::error::AppError;
use crate::models::candidate::{Candidate, CandidateFilter, ImportListing, NewCandidate};
use crate::routes::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CandidateFilter>,
) -> Result<Json<ApiResponse<Vec<Candidate>>>, AppError> {
    let candidates = state.candidates.list(&filter).await?;
    Ok(ok(candidates))
}

/// POST /api/candidates
///
/// Persist a candidate a recruiter has confirmed, typically an edited draft
/// from /api/parse-cv.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewCandidate>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    let input = input.normalized();
    if input.full_name.is_empty() {
        return Err(AppError::BadRequest("Candidate name is required".to_string()));
    }
    let candidate = state.candidates.insert(input).await?;
    tracing::info!(id = candidate.id, "Candidate created");
    Ok(ok(candidate))
}

/// POST /api/candidates/import
///
/// Store an external listing as a lead.
pub async fn import(
    State(state): State<AppState>,
    Json(input): Json<ImportListing>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    if input.listing.title.trim().is_empty() {
        return Err(AppError::BadRequest("Listing title is required".to_string()));
    }
    let lead = NewCandidate::from_listing(&input.listing, input.full_name).normalized();
    let candidate = state.candidates.insert(lead).await?;
    tracing::info!(
        id = candidate.id,
        source = %input.listing.source,
        "Imported external listing as lead"
    );
    Ok(ok(candidate))
}
