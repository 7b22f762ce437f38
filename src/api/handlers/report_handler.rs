//! Report handlers - statistics and search.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::domain::{ApplicationResponse, Statistics};
use crate::errors::AppResult;

use super::super::AppState;

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Substring matched case-insensitively against id and name
    #[serde(default)]
    pub q: String,
}

/// Aggregate counts over all applications
#[utoipa::path(
    get,
    path = "/statistics",
    tag = "Reports",
    responses(
        (status = 200, description = "Counts by status, region and day", body = Statistics)
    )
)]
pub async fn get_statistics(State(state): State<AppState>) -> AppResult<Json<Statistics>> {
    let statistics = state.report_service.statistics().await?;
    Ok(Json(statistics))
}

/// Search applications by partial id or name
#[utoipa::path(
    get,
    path = "/search",
    tag = "Reports",
    params(
        ("q" = String, Query, description = "Search term; blank matches nothing")
    ),
    responses(
        (status = 200, description = "Matching applications", body = Vec<ApplicationResponse>)
    )
)]
pub async fn search_applications(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ApplicationResponse>>> {
    let matches = state.report_service.search(&params.q).await?;
    Ok(Json(
        matches.into_iter().map(ApplicationResponse::from).collect(),
    ))
}
