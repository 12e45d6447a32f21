use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{ApiResponse, ok};
use crate::error::AppError;
use crate::portals::{ListingRecord, Portal};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct ExternalSearchQuery {
    pub q: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchAllQuery {
    pub q: Option<String>,
    /// Comma-separated portal identifiers; every registered portal when absent.
    pub sites: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<ListingRecord>,
    pub errors: BTreeMap<Portal, String>,
}

fn required_query(q: Option<String>) -> Result<String, AppError> {
    q.map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing search query".to_string()))
}

fn parse_portal(site: &str) -> Result<Portal, AppError> {
    site.parse()
        .map_err(|e: crate::portals::UnknownPortal| AppError::BadRequest(e.to_string()))
}

/// GET /api/external-search?q=&site=
///
/// Query a single portal. An upstream failure is reported as an error
/// response since there is nothing else to return.
pub async fn external_search(
    State(state): State<AppState>,
    Query(params): Query<ExternalSearchQuery>,
) -> Result<Json<ApiResponse<Vec<ListingRecord>>>, AppError> {
    let query = required_query(params.q)?;
    let portal = parse_portal(params.site.as_deref().unwrap_or_default())?;

    let mut outcome = state.aggregator.search(&query, &[portal]).await?;
    if let Some(message) = outcome.errors.remove(&portal) {
        return Err(AppError::Upstream(message));
    }
    Ok(ok(outcome.results))
}

/// GET /api/search?q=&sites=empleos,mifuturo
///
/// Fan out to several portals; failing portals are listed in `errors`.
pub async fn search_all(
    State(state): State<AppState>,
    Query(params): Query<SearchAllQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = required_query(params.q)?;
    let sites = match params.sites.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_portal)
            .collect::<Result<Vec<_>, _>>()?,
        None => state.aggregator.portals(),
    };

    let outcome = state.aggregator.search(&query, &sites).await?;
    Ok(Json(SearchResponse {
        success: true,
        data: outcome.results,
        errors: outcome.errors,
    }))
}
