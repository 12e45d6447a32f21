use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use super::{ApiResponse, ok};
use crate::documents::{CandidateProfile, extract_profile};
use crate::error::AppError;
use crate::routes::AppState;

const FILE_FIELD: &str = "file";

fn upload_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the size limit: {e}"))
    } else {
        AppError::BadRequest(format!("Invalid upload: {e}"))
    }
}

/// POST /api/parse-cv
///
/// Accepts a multipart upload with a `file` field holding a PDF résumé and
/// returns a draft profile for a recruiter to confirm. Nothing is stored.
pub async fn parse_cv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<CandidateProfile>>, AppError> {
    let mut multipart =
        multipart.map_err(|_| AppError::BadRequest("No file uploaded".to_string()))?;

    let mut document = None;
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field.bytes().await.map_err(upload_error)?;
            document = Some(bytes);
            break;
        }
    }

    let bytes = document
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let size = bytes.len();

    let extractor = state.extractor.clone();
    let text = tokio::task::spawn_blocking(move || extractor.extract_text(&bytes))
        .await
        .map_err(|e| AppError::Internal(format!("Extraction task failed: {e}")))??;

    let profile = extract_profile(&text);
    tracing::info!(
        bytes = size,
        chars = text.chars().count(),
        skills = profile.skills.len(),
        "Parsed uploaded résumé"
    );
    Ok(ok(profile))
}
