//! Read-only sync endpoint for the external client.

use axum::{extract::State, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ApplicationResponse;
use crate::errors::AppResult;

use super::super::AppState;

/// Full dump wrapper, the shape the external client expects
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncDumpResponse {
    pub applications: Vec<ApplicationResponse>,
}

/// Full application dump
#[utoipa::path(
    get,
    path = "/sync",
    tag = "Sync",
    responses(
        (status = 200, description = "All applications", body = SyncDumpResponse)
    )
)]
pub async fn sync_dump(State(state): State<AppState>) -> AppResult<Json<SyncDumpResponse>> {
    let applications = state.application_service.list().await?;
    Ok(Json(SyncDumpResponse {
        applications: applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
    }))
}
