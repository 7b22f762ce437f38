//! End-to-end tests for the JSON file backend.
//!
//! Runs the real service layer over `JsonPersistence` in a temp directory,
//! covering the observable properties of submit/edit/undo/verify/sort and
//! search.

use std::sync::Arc;

use tempfile::TempDir;

use ktp_admin::domain::{Applicant, ApplicationForm, ApplicationStatus, SortKey};
use ktp_admin::errors::AppError;
use ktp_admin::infra::{JsonPersistence, UnitOfWork};
use ktp_admin::services::{
    ApplicationManager, ApplicationService, ReportManager, ReportService,
};

struct Harness {
    // Keeps the temp directory alive for the duration of a test
    _data_dir: TempDir,
    store: Arc<JsonPersistence>,
    applications: ApplicationManager,
    reports: ReportManager,
}

fn harness() -> Harness {
    let data_dir = TempDir::new().expect("temp dir");
    let store = Arc::new(JsonPersistence::new(data_dir.path()).expect("file store"));
    Harness {
        applications: ApplicationManager::new(store.clone()),
        reports: ReportManager::new(store.clone()),
        store,
        _data_dir: data_dir,
    }
}

fn form(name: &str, address: &str, region: &str) -> ApplicationForm {
    ApplicationForm {
        name: name.to_string(),
        address: address.to_string(),
        region: region.to_string(),
    }
}

/// Insert a record with controlled id and submission time.
async fn seed(
    h: &Harness,
    region: &str,
    name: &str,
    submission_time: i64,
) -> Applicant {
    let app = Applicant {
        id: format!("{}-{}", region, submission_time),
        name: name.to_string(),
        address: "Jl. Merdeka No. 12".to_string(),
        region: region.to_string(),
        submission_time,
        status: ApplicationStatus::Pending,
    };
    h.store
        .applications()
        .insert(app.clone())
        .await
        .expect("seed insert");
    app
}

#[tokio::test]
async fn submit_produces_pending_record_with_region_in_id() {
    let h = harness();

    let app = h
        .applications
        .submit(form("Budi Santoso", "Jl. Merdeka No. 12", "Jakarta"))
        .await
        .unwrap();

    assert_eq!(app.status, ApplicationStatus::Pending);
    assert!(app.id.starts_with("Jakarta-"));

    let listed = h.applications.list().await.unwrap();
    assert_eq!(listed, vec![app]);
}

#[tokio::test]
async fn duplicate_id_is_a_conflict() {
    let h = harness();
    let app = seed(&h, "Jakarta", "Budi", 1_000).await;

    let result = h.store.applications().insert(app).await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn edit_marks_revision_and_stores_one_snapshot() {
    let h = harness();
    let app = seed(&h, "Jakarta", "Budi", 1_000).await;

    let edited = h
        .applications
        .edit(&app.id, form("Budi Santoso", "Jl. Baru No. 3", "Bandung"))
        .await
        .unwrap();

    assert_eq!(edited.status, ApplicationStatus::Revision);
    assert_eq!(edited.name, "Budi Santoso");
    assert_eq!(edited.region, "Bandung");
    // id and submission time survive the edit
    assert_eq!(edited.id, app.id);
    assert_eq!(edited.submission_time, app.submission_time);

    // exactly one retrievable prior-state snapshot
    assert_eq!(h.store.revisions().depth(&app.id).await.unwrap(), 1);
    let snapshot = h.applications.last_snapshot(&app.id).await.unwrap();
    assert_eq!(snapshot.name, "Budi");
    assert_eq!(snapshot.region, "Jakarta");
    assert_eq!(snapshot.status, ApplicationStatus::Pending);
}

#[tokio::test]
async fn edit_of_missing_id_fails_not_found() {
    let h = harness();
    let result = h
        .applications
        .edit("Jakarta-404", form("A", "B", "C"))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn undo_restores_all_fields_and_consumes_the_snapshot() {
    let h = harness();
    let app = seed(&h, "Jakarta", "Budi", 1_000).await;
    h.applications.verify(&app.id).await.unwrap();

    h.applications
        .edit(&app.id, form("Edited", "Elsewhere", "Bandung"))
        .await
        .unwrap();

    let restored = h.applications.undo(&app.id).await.unwrap();
    assert_eq!(restored.name, "Budi");
    assert_eq!(restored.address, "Jl. Merdeka No. 12");
    assert_eq!(restored.region, "Jakarta");
    // status comes back as captured at edit time, not as pending
    assert_eq!(restored.status, ApplicationStatus::Verified);
    assert_eq!(h.store.revisions().depth(&app.id).await.unwrap(), 0);

    // the stack is empty now; a second undo fails
    let second = h.applications.undo(&app.id).await;
    assert!(matches!(second.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn undo_pops_most_recent_snapshot_first() {
    let h = harness();
    let app = seed(&h, "Jakarta", "First", 1_000).await;

    h.applications
        .edit(&app.id, form("Second", "Jl. Merdeka No. 12", "Jakarta"))
        .await
        .unwrap();
    h.applications
        .edit(&app.id, form("Third", "Jl. Merdeka No. 12", "Jakarta"))
        .await
        .unwrap();
    assert_eq!(h.store.revisions().depth(&app.id).await.unwrap(), 2);

    let after_first_undo = h.applications.undo(&app.id).await.unwrap();
    assert_eq!(after_first_undo.name, "Second");

    let after_second_undo = h.applications.undo(&app.id).await.unwrap();
    assert_eq!(after_second_undo.name, "First");
}

#[tokio::test]
async fn verify_is_unconditional_and_not_undoable() {
    let h = harness();
    let app = seed(&h, "Jakarta", "Budi", 1_000).await;

    let verified = h.applications.verify(&app.id).await.unwrap();
    assert_eq!(verified.status, ApplicationStatus::Verified);

    // verify pushed no snapshot, so there is nothing to undo
    let undo = h.applications.undo(&app.id).await;
    assert!(matches!(undo.unwrap_err(), AppError::NotFound));

    // verifying an already-verified record is fine
    let again = h.applications.verify(&app.id).await.unwrap();
    assert_eq!(again.status, ApplicationStatus::Verified);
}

#[tokio::test]
async fn sort_by_region_persists_the_new_ordering() {
    let h = harness();
    seed(&h, "Surabaya", "A", 1_000).await;
    seed(&h, "Bandung", "B", 2_000).await;
    seed(&h, "Jakarta", "C", 3_000).await;

    let sorted = h.applications.list_sorted(SortKey::Region).await.unwrap();
    let regions: Vec<&str> = sorted.iter().map(|a| a.region.as_str()).collect();
    assert_eq!(regions, vec!["Bandung", "Jakarta", "Surabaya"]);

    // the file backend rewrote the collection in the new order
    let listed = h.applications.list().await.unwrap();
    assert_eq!(listed, sorted);
}

#[tokio::test]
async fn sort_by_time_is_non_decreasing() {
    let h = harness();
    seed(&h, "Jakarta", "C", 3_000).await;
    seed(&h, "Bandung", "A", 1_000).await;
    seed(&h, "Surabaya", "B", 2_000).await;

    let sorted = h.applications.list_sorted(SortKey::Time).await.unwrap();
    let times: Vec<i64> = sorted.iter().map(|a| a.submission_time).collect();
    assert_eq!(times, vec![1_000, 2_000, 3_000]);
}

#[tokio::test]
async fn search_is_substring_and_case_insensitive() {
    let h = harness();
    seed(&h, "Jakarta", "Budi Santoso", 1_000).await;
    seed(&h, "Bandung", "Siti Aminah", 2_000).await;

    let by_name = h.reports.search("bUdI").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Budi Santoso");

    let by_partial_id = h.reports.search("bandung-2").await.unwrap();
    assert_eq!(by_partial_id.len(), 1);
    assert_eq!(by_partial_id[0].name, "Siti Aminah");

    assert!(h.reports.search("nonexistent").await.unwrap().is_empty());
    assert!(h.reports.search("  ").await.unwrap().is_empty());
}

#[tokio::test]
async fn statistics_reflect_the_full_collection() {
    let h = harness();
    let a = seed(&h, "Jakarta", "A", 1_000).await;
    let b = seed(&h, "Jakarta", "B", 2_000).await;
    seed(&h, "Bandung", "C", 90_000_000_000).await;

    h.applications.verify(&a.id).await.unwrap();
    h.applications
        .edit(&b.id, form("B2", "Jl. Baru", "Jakarta"))
        .await
        .unwrap();

    let stats = h.reports.statistics().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_status.verified, 1);
    assert_eq!(stats.by_status.revision, 1);
    assert_eq!(stats.by_status.pending, 1);
    assert_eq!(stats.by_region[0].region, "Jakarta");
    assert_eq!(stats.by_region[0].count, 2);
    assert_eq!(stats.by_day.len(), 2);
}

#[tokio::test]
async fn delete_removes_the_record() {
    let h = harness();
    let app = seed(&h, "Jakarta", "Budi", 1_000).await;

    h.store.applications().delete(&app.id).await.unwrap();
    assert!(h.applications.list().await.unwrap().is_empty());

    let again = h.store.applications().delete(&app.id).await;
    assert!(matches!(again.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn store_survives_reopening_the_data_directory() {
    let data_dir = TempDir::new().expect("temp dir");
    let id;
    {
        let store = Arc::new(JsonPersistence::new(data_dir.path()).unwrap());
        let service = ApplicationManager::new(store);
        id = service
            .submit(form("Budi", "Jl. Merdeka No. 12", "Jakarta"))
            .await
            .unwrap()
            .id;
    }

    // a fresh handle over the same directory sees the same data
    let store = Arc::new(JsonPersistence::new(data_dir.path()).unwrap());
    let service = ApplicationManager::new(store);
    let app = service.get(&id).await.unwrap();
    assert_eq!(app.name, "Budi");
}
