//! JSON file persistence backend.
//!
//! Alternative implementation of the repository interface backed by two
//! JSON files under a data directory: an array of applications and a map
//! of application id to its stack of revision snapshots. A process-wide
//! mutex makes every operation a single read-modify-write, which is the
//! whole concurrency story for this backend.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{ApplicationRepository, RevisionRepository};
use crate::config::{APPLICATIONS_FILE, REVISIONS_FILE};
use crate::domain::{Applicant, ApplicationForm, Revision, SortKey};
use crate::errors::{AppError, AppResult};
use crate::infra::unit_of_work::UnitOfWork;

/// Shared file-store core: paths plus the mutex serializing access.
pub struct JsonFiles {
    applications_path: PathBuf,
    revisions_path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFiles {
    fn new(data_dir: &Path) -> AppResult<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            applications_path: data_dir.join(APPLICATIONS_FILE),
            revisions_path: data_dir.join(REVISIONS_FILE),
            lock: Mutex::new(()),
        })
    }

    /// Serialize access; a poisoned lock is recovered since the files on
    /// disk are always left in a consistent state between operations.
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_applications(&self) -> AppResult<Vec<Applicant>> {
        if !self.applications_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.applications_path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_applications(&self, applications: &[Applicant]) -> AppResult<()> {
        let data = serde_json::to_string_pretty(applications)?;
        fs::write(&self.applications_path, data)?;
        Ok(())
    }

    fn read_revisions(&self) -> AppResult<HashMap<String, Vec<Revision>>> {
        if !self.revisions_path.exists() {
            return Ok(HashMap::new());
        }
        let data = fs::read_to_string(&self.revisions_path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_revisions(&self, revisions: &HashMap<String, Vec<Revision>>) -> AppResult<()> {
        let data = serde_json::to_string_pretty(revisions)?;
        fs::write(&self.revisions_path, data)?;
        Ok(())
    }
}

/// File-backed implementation of ApplicationRepository
pub struct JsonApplicationStore {
    files: Arc<JsonFiles>,
}

#[async_trait]
impl ApplicationRepository for JsonApplicationStore {
    async fn get(&self, id: &str) -> AppResult<Option<Applicant>> {
        let _guard = self.files.guard();
        let applications = self.files.read_applications()?;
        Ok(applications.into_iter().find(|app| app.id == id))
    }

    async fn list(&self) -> AppResult<Vec<Applicant>> {
        let _guard = self.files.guard();
        // File order is the persisted order; sorting rewrites it
        self.files.read_applications()
    }

    async fn list_sorted(&self, key: SortKey) -> AppResult<Vec<Applicant>> {
        let _guard = self.files.guard();
        let mut applications = self.files.read_applications()?;
        match key {
            SortKey::Region => applications.sort_by(|a, b| a.region.cmp(&b.region)),
            SortKey::Time => {
                applications.sort_by(|a, b| a.submission_time.cmp(&b.submission_time))
            }
        }
        self.files.write_applications(&applications)?;
        Ok(applications)
    }

    async fn insert(&self, application: Applicant) -> AppResult<Applicant> {
        let _guard = self.files.guard();
        let mut applications = self.files.read_applications()?;
        if applications.iter().any(|app| app.id == application.id) {
            return Err(AppError::conflict("Application"));
        }
        applications.push(application.clone());
        self.files.write_applications(&applications)?;
        Ok(application)
    }

    async fn update(&self, application: Applicant) -> AppResult<Applicant> {
        let _guard = self.files.guard();
        let mut applications = self.files.read_applications()?;
        let slot = applications
            .iter_mut()
            .find(|app| app.id == application.id)
            .ok_or(AppError::NotFound)?;
        *slot = application.clone();
        self.files.write_applications(&applications)?;
        Ok(application)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let _guard = self.files.guard();
        let mut applications = self.files.read_applications()?;
        let index = applications
            .iter()
            .position(|app| app.id == id)
            .ok_or(AppError::NotFound)?;
        applications.remove(index);
        self.files.write_applications(&applications)?;
        Ok(())
    }
}

/// File-backed implementation of RevisionRepository
pub struct JsonRevisionStore {
    files: Arc<JsonFiles>,
}

#[async_trait]
impl RevisionRepository for JsonRevisionStore {
    async fn push(&self, snapshot: Revision) -> AppResult<()> {
        let _guard = self.files.guard();
        let mut revisions = self.files.read_revisions()?;
        revisions
            .entry(snapshot.application_id.clone())
            .or_default()
            .push(snapshot);
        self.files.write_revisions(&revisions)
    }

    async fn latest(&self, application_id: &str) -> AppResult<Option<Revision>> {
        let _guard = self.files.guard();
        let revisions = self.files.read_revisions()?;
        Ok(revisions
            .get(application_id)
            .and_then(|stack| stack.last().cloned()))
    }

    async fn depth(&self, application_id: &str) -> AppResult<u64> {
        let _guard = self.files.guard();
        let revisions = self.files.read_revisions()?;
        Ok(revisions
            .get(application_id)
            .map(|stack| stack.len() as u64)
            .unwrap_or(0))
    }
}

/// File-backed unit of work.
///
/// The composite operations hold the store mutex across both file writes,
/// so edit+snapshot and restore+pop never interleave with other requests.
pub struct JsonPersistence {
    files: Arc<JsonFiles>,
    application_repo: Arc<JsonApplicationStore>,
    revision_repo: Arc<JsonRevisionStore>,
}

impl JsonPersistence {
    /// Create the file backend rooted at the given data directory.
    pub fn new(data_dir: &Path) -> AppResult<Self> {
        let files = Arc::new(JsonFiles::new(data_dir)?);
        Ok(Self {
            application_repo: Arc::new(JsonApplicationStore {
                files: files.clone(),
            }),
            revision_repo: Arc::new(JsonRevisionStore {
                files: files.clone(),
            }),
            files,
        })
    }
}

#[async_trait]
impl UnitOfWork for JsonPersistence {
    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.application_repo.clone()
    }

    fn revisions(&self) -> Arc<dyn RevisionRepository> {
        self.revision_repo.clone()
    }

    async fn edit_with_snapshot(
        &self,
        id: &str,
        form: ApplicationForm,
    ) -> AppResult<Applicant> {
        let _guard = self.files.guard();

        let mut applications = self.files.read_applications()?;
        let slot = applications
            .iter_mut()
            .find(|app| app.id == id)
            .ok_or(AppError::NotFound)?;

        let mut revisions = self.files.read_revisions()?;
        revisions
            .entry(id.to_string())
            .or_default()
            .push(slot.snapshot(Utc::now().timestamp_millis()));
        self.files.write_revisions(&revisions)?;

        slot.apply_edit(form);
        let updated = slot.clone();
        self.files.write_applications(&applications)?;

        Ok(updated)
    }

    async fn restore_latest_snapshot(&self, id: &str) -> AppResult<Applicant> {
        let _guard = self.files.guard();

        let mut revisions = self.files.read_revisions()?;
        let snapshot = revisions
            .get_mut(id)
            .and_then(|stack| stack.pop())
            .ok_or(AppError::NotFound)?;

        let mut applications = self.files.read_applications()?;
        let slot = applications
            .iter_mut()
            .find(|app| app.id == id)
            .ok_or(AppError::NotFound)?;

        self.files.write_revisions(&revisions)?;

        slot.restore(snapshot);
        let restored = slot.clone();
        self.files.write_applications(&applications)?;

        Ok(restored)
    }

    async fn ping(&self) -> AppResult<()> {
        // Storage is healthy if the data files remain reachable
        if self.files.applications_path.exists() {
            fs::metadata(&self.files.applications_path)?;
        }
        Ok(())
    }
}
