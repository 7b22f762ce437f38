//! Application handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ApplicationForm, ApplicationResponse, RevisionResponse, SortKey};
use crate::errors::AppResult;

use super::super::extractors::ValidatedJson;
use super::super::AppState;

/// Submission/edit request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ApplicationRequest {
    /// Applicant full name
    #[validate(length(min = 1, message = "Name, address, and region are required"))]
    #[schema(example = "Budi Santoso")]
    pub name: String,
    /// Residential address
    #[validate(length(min = 1, message = "Name, address, and region are required"))]
    #[schema(example = "Jl. Merdeka No. 12")]
    pub address: String,
    /// Administrative region
    #[validate(length(min = 1, message = "Name, address, and region are required"))]
    #[schema(example = "Jakarta")]
    pub region: String,
}

impl From<ApplicationRequest> for ApplicationForm {
    fn from(req: ApplicationRequest) -> Self {
        ApplicationForm {
            name: req.name,
            address: req.address,
            region: req.region,
        }
    }
}

/// Patch actions on a single application
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatchAction {
    Verify,
    Undo,
}

/// Patch request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PatchRequest {
    /// `verify` or `undo`
    pub action: PatchAction,
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Optional sort mode (`region` or `time`)
    pub sort: Option<SortKey>,
}

/// Create application routes
pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_applications).post(submit_application))
        .route(
            "/:id",
            get(get_application)
                .put(edit_application)
                .patch(patch_application),
        )
        .route("/:id/revision", get(latest_revision))
}

/// List all applications, optionally sorted
#[utoipa::path(
    get,
    path = "/applications",
    tag = "Applications",
    params(
        ("sort" = Option<String>, Query, description = "Sort mode: region or time")
    ),
    responses(
        (status = 200, description = "All applications", body = Vec<ApplicationResponse>),
        (status = 400, description = "Unknown sort mode")
    )
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<ApplicationResponse>>> {
    let applications = match params.sort {
        Some(key) => state.application_service.list_sorted(key).await?,
        None => state.application_service.list().await?,
    };

    Ok(Json(
        applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
    ))
}

/// Submit a new application
#[utoipa::path(
    post,
    path = "/applications",
    tag = "Applications",
    request_body = ApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Id collision")
    )
)]
pub async fn submit_application(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ApplicationRequest>,
) -> AppResult<(StatusCode, Json<ApplicationResponse>)> {
    let application = state.application_service.submit(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

/// Get a single application by id
#[utoipa::path(
    get,
    path = "/applications/{id}",
    tag = "Applications",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "The application", body = ApplicationResponse),
        (status = 404, description = "Application not found")
    )
)]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApplicationResponse>> {
    let application = state.application_service.get(&id).await?;
    Ok(Json(application.into()))
}

/// Edit an application (stores an undo snapshot first)
#[utoipa::path(
    put,
    path = "/applications/{id}",
    tag = "Applications",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    request_body = ApplicationRequest,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn edit_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ApplicationRequest>,
) -> AppResult<Json<ApplicationResponse>> {
    let application = state.application_service.edit(&id, payload.into()).await?;
    Ok(Json(application.into()))
}

/// Apply a verify or undo action
#[utoipa::path(
    patch,
    path = "/applications/{id}",
    tag = "Applications",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    request_body = PatchRequest,
    responses(
        (status = 200, description = "Action applied", body = ApplicationResponse),
        (status = 400, description = "Missing or invalid action"),
        (status = 404, description = "Application or revision not found")
    )
)]
pub async fn patch_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<PatchRequest>,
) -> AppResult<Json<ApplicationResponse>> {
    let application = match payload.action {
        PatchAction::Verify => state.application_service.verify(&id).await?,
        PatchAction::Undo => state.application_service.undo(&id).await?,
    };

    Ok(Json(application.into()))
}

/// Get the most recent undo snapshot for an application
#[utoipa::path(
    get,
    path = "/applications/{id}/revision",
    tag = "Applications",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "The latest snapshot", body = RevisionResponse),
        (status = 404, description = "No snapshot stored")
    )
)]
pub async fn latest_revision(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RevisionResponse>> {
    let snapshot = state.application_service.last_snapshot(&id).await?;
    Ok(Json(snapshot.into()))
}
