//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{application_handler, report_handler, sync_handler};
use crate::domain::{
    ApplicationResponse, ApplicationStatus, DailyCount, RegionCount, RevisionResponse, Statistics,
    StatusCounts,
};

/// OpenAPI documentation for the KTP administration service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "KTP Admin",
        version = "0.1.0",
        description = "Administrative service for identity-card (KTP) applications",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Application endpoints
        application_handler::list_applications,
        application_handler::submit_application,
        application_handler::get_application,
        application_handler::edit_application,
        application_handler::patch_application,
        application_handler::latest_revision,
        // Reports
        report_handler::get_statistics,
        report_handler::search_applications,
        // Sync
        sync_handler::sync_dump,
    ),
    components(
        schemas(
            // Domain types
            ApplicationStatus,
            ApplicationResponse,
            RevisionResponse,
            Statistics,
            StatusCounts,
            RegionCount,
            DailyCount,
            // Request types
            application_handler::ApplicationRequest,
            application_handler::PatchRequest,
            application_handler::PatchAction,
            // Sync types
            sync_handler::SyncDumpResponse,
        )
    ),
    tags(
        (name = "Applications", description = "Submission, editing, verification and undo"),
        (name = "Reports", description = "Statistics and search"),
        (name = "Sync", description = "Read-only dump for the external client")
    )
)]
pub struct ApiDoc;
