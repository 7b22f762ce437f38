//! Application service - the submit/edit/verify/undo use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Applicant, ApplicationForm, Revision, SortKey};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Application service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Submit a new application; assigns the id and pending status
    async fn submit(&self, form: ApplicationForm) -> AppResult<Applicant>;

    /// Fetch a single application by id
    async fn get(&self, id: &str) -> AppResult<Applicant>;

    /// List all applications
    async fn list(&self) -> AppResult<Vec<Applicant>>;

    /// List all applications ordered by the given key
    async fn list_sorted(&self, key: SortKey) -> AppResult<Vec<Applicant>>;

    /// Set the status to verified, whatever it currently is
    async fn verify(&self, id: &str) -> AppResult<Applicant>;

    /// Snapshot the record, then overwrite its editable fields and mark
    /// it as mid-revision
    async fn edit(&self, id: &str, form: ApplicationForm) -> AppResult<Applicant>;

    /// Restore and consume the most recent snapshot
    async fn undo(&self, id: &str) -> AppResult<Applicant>;

    /// Peek the most recent snapshot without consuming it
    async fn last_snapshot(&self, id: &str) -> AppResult<Revision>;
}

/// Concrete implementation of ApplicationService
pub struct ApplicationManager {
    store: Arc<dyn UnitOfWork>,
}

impl ApplicationManager {
    /// Create new service instance over the configured store
    pub fn new(store: Arc<dyn UnitOfWork>) -> Self {
        Self { store }
    }
}

/// All three form fields are required; blank strings count as missing.
fn validate_form(form: &ApplicationForm) -> AppResult<()> {
    if form.name.trim().is_empty() || form.address.trim().is_empty() || form.region.trim().is_empty()
    {
        return Err(AppError::validation(
            "Name, address, and region are required",
        ));
    }
    Ok(())
}

#[async_trait]
impl ApplicationService for ApplicationManager {
    async fn submit(&self, form: ApplicationForm) -> AppResult<Applicant> {
        validate_form(&form)?;
        let application = Applicant::submit(form);
        tracing::info!(id = %application.id, "Submitting application");
        self.store.applications().insert(application).await
    }

    async fn get(&self, id: &str) -> AppResult<Applicant> {
        self.store
            .applications()
            .get(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list(&self) -> AppResult<Vec<Applicant>> {
        self.store.applications().list().await
    }

    async fn list_sorted(&self, key: SortKey) -> AppResult<Vec<Applicant>> {
        self.store.applications().list_sorted(key).await
    }

    async fn verify(&self, id: &str) -> AppResult<Applicant> {
        let repo = self.store.applications();
        let mut application = repo.get(id).await?.ok_or(AppError::NotFound)?;
        application.verify();
        tracing::info!(id = %id, "Application verified");
        repo.update(application).await
    }

    async fn edit(&self, id: &str, form: ApplicationForm) -> AppResult<Applicant> {
        validate_form(&form)?;
        let updated = self.store.edit_with_snapshot(id, form).await?;
        tracing::info!(id = %id, "Application edited, snapshot stored");
        Ok(updated)
    }

    async fn undo(&self, id: &str) -> AppResult<Applicant> {
        let restored = self.store.restore_latest_snapshot(id).await?;
        tracing::info!(id = %id, "Revision undone");
        Ok(restored)
    }

    async fn last_snapshot(&self, id: &str) -> AppResult<Revision> {
        self.store
            .revisions()
            .latest(id)
            .await?
            .ok_or(AppError::NotFound)
    }
}
