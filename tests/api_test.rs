//! Integration tests for API endpoints.
//!
//! These tests use mock services to exercise routing, extraction,
//! validation, and response shapes without a real backing store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use ktp_admin::api::{create_router, AppState};
use ktp_admin::domain::{
    Applicant, ApplicationForm, ApplicationStatus, Revision, SortKey, Statistics,
};
use ktp_admin::errors::{AppError, AppResult};
use ktp_admin::infra::MockUnitOfWork;
use ktp_admin::services::{ApplicationService, ReportService};

// =============================================================================
// Mock Services for Testing
// =============================================================================

fn sample(id: &str, name: &str, region: &str, time: i64) -> Applicant {
    Applicant {
        id: id.to_string(),
        name: name.to_string(),
        address: "Jl. Merdeka No. 12".to_string(),
        region: region.to_string(),
        submission_time: time,
        status: ApplicationStatus::Pending,
    }
}

fn sample_set() -> Vec<Applicant> {
    vec![
        sample("Jakarta-1000", "Budi Santoso", "Jakarta", 1_000),
        sample("Bandung-2000", "Siti Aminah", "Bandung", 2_000),
    ]
}

/// Mock application service with predefined responses
struct MockApplicationServiceImpl;

#[async_trait]
impl ApplicationService for MockApplicationServiceImpl {
    async fn submit(&self, form: ApplicationForm) -> AppResult<Applicant> {
        Ok(Applicant::submit(form))
    }

    async fn get(&self, id: &str) -> AppResult<Applicant> {
        if id == "missing" {
            return Err(AppError::NotFound);
        }
        Ok(sample(id, "Budi Santoso", "Jakarta", 1_000))
    }

    async fn list(&self) -> AppResult<Vec<Applicant>> {
        Ok(sample_set())
    }

    async fn list_sorted(&self, key: SortKey) -> AppResult<Vec<Applicant>> {
        let mut apps = sample_set();
        match key {
            SortKey::Region => apps.sort_by(|a, b| a.region.cmp(&b.region)),
            SortKey::Time => apps.sort_by(|a, b| a.submission_time.cmp(&b.submission_time)),
        }
        Ok(apps)
    }

    async fn verify(&self, id: &str) -> AppResult<Applicant> {
        let mut app = sample(id, "Budi Santoso", "Jakarta", 1_000);
        app.verify();
        Ok(app)
    }

    async fn edit(&self, id: &str, form: ApplicationForm) -> AppResult<Applicant> {
        if id == "missing" {
            return Err(AppError::NotFound);
        }
        let mut app = sample(id, "Budi Santoso", "Jakarta", 1_000);
        app.apply_edit(form);
        Ok(app)
    }

    async fn undo(&self, id: &str) -> AppResult<Applicant> {
        if id == "no-revisions" {
            return Err(AppError::NotFound);
        }
        Ok(sample(id, "Budi Santoso", "Jakarta", 1_000))
    }

    async fn last_snapshot(&self, id: &str) -> AppResult<Revision> {
        if id == "no-revisions" {
            return Err(AppError::NotFound);
        }
        Ok(Revision {
            application_id: id.to_string(),
            name: "Budi Santoso".to_string(),
            address: "Jl. Merdeka No. 12".to_string(),
            region: "Jakarta".to_string(),
            submission_time: 1_000,
            status: ApplicationStatus::Pending,
            revision_time: 2_000,
        })
    }
}

/// Mock report service over the same sample records
struct MockReportServiceImpl;

#[async_trait]
impl ReportService for MockReportServiceImpl {
    async fn statistics(&self) -> AppResult<Statistics> {
        Ok(Statistics::compute(&sample_set()))
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Applicant>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(sample_set()
            .into_iter()
            .filter(|app| app.matches(&needle))
            .collect())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_state() -> AppState {
    let mut store = MockUnitOfWork::new();
    store.expect_ping().returning(|| Ok(()));

    AppState::new(
        Arc::new(MockApplicationServiceImpl),
        Arc::new(MockReportServiceImpl),
        Arc::new(store),
    )
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let app = create_router(test_state());
    let response = app.oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

// =============================================================================
// Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_root_returns_banner() {
    let app = create_router(test_state());
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"KTP Application Administration Service");
}

#[tokio::test]
async fn test_health_reports_storage_status() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["storage"]["status"], "healthy");
}

#[tokio::test]
async fn test_list_applications() {
    let (status, body) = send(get("/applications")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "Jakarta-1000");
    assert_eq!(items[0]["status"], "pending");
}

#[tokio::test]
async fn test_list_applications_sorted_by_region() {
    let (status, body) = send(get("/applications?sort=region")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array body");
    assert_eq!(items[0]["region"], "Bandung");
    assert_eq!(items[1]["region"], "Jakarta");
}

#[tokio::test]
async fn test_submit_application_created() {
    let (status, body) = send(json_request(
        "POST",
        "/applications",
        r#"{"name":"Budi Santoso","address":"Jl. Merdeka No. 12","region":"Jakarta"}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert!(body["id"].as_str().unwrap().starts_with("Jakarta-"));
}

#[tokio::test]
async fn test_submit_application_rejects_empty_field() {
    let (status, body) = send(json_request(
        "POST",
        "/applications",
        r#"{"name":"","address":"Jl. Merdeka No. 12","region":"Jakarta"}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_submit_application_rejects_malformed_body() {
    let (status, body) = send(json_request("POST", "/applications", "{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_application_not_found() {
    let (status, body) = send(get("/applications/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_edit_application() {
    let (status, body) = send(json_request(
        "PUT",
        "/applications/Jakarta-1000",
        r#"{"name":"Edited","address":"Jl. Baru 3","region":"Bandung"}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "revision");
    assert_eq!(body["name"], "Edited");
}

#[tokio::test]
async fn test_patch_verify() {
    let (status, body) = send(json_request(
        "PATCH",
        "/applications/Jakarta-1000",
        r#"{"action":"verify"}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "verified");
}

#[tokio::test]
async fn test_patch_undo_without_revisions_is_not_found() {
    let (status, body) = send(json_request(
        "PATCH",
        "/applications/no-revisions",
        r#"{"action":"undo"}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_patch_rejects_unknown_action() {
    let (status, body) = send(json_request(
        "PATCH",
        "/applications/Jakarta-1000",
        r#"{"action":"frobnicate"}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_latest_revision() {
    let (status, body) = send(get("/applications/Jakarta-1000/revision")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application_id"], "Jakarta-1000");
    assert_eq!(body["revision_time"], 2_000);
}

#[tokio::test]
async fn test_search_returns_matches() {
    let (status, body) = send(get("/search?q=siti")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "Bandung-2000");
}

#[tokio::test]
async fn test_search_blank_query_returns_empty() {
    let (status, body) = send(get("/search?q=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array body").len(), 0);
}

#[tokio::test]
async fn test_statistics_shape() {
    let (status, body) = send(get("/statistics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["by_status"]["pending"], 2);
    assert!(body["by_region"].is_array());
    assert!(body["by_day"].is_array());
}

#[tokio::test]
async fn test_sync_dump_wraps_applications() {
    let (status, body) = send(get("/sync")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["applications"].as_array().expect("wrapped array");
    assert_eq!(items.len(), 2);
}
