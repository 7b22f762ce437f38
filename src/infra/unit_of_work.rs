//! Unit of Work: repository access plus the composite operations that
//! must not be torn apart.
//!
//! Edit pushes a snapshot before mutating, undo restores and consumes one;
//! both span the application record and its revision stack, so both run as
//! a single transaction here instead of two independent writes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, Statement, TransactionTrait,
};

use super::repositories::entities::{application, revision};
use super::repositories::{
    ApplicationRepository, ApplicationStore, RevisionRepository, RevisionStore,
};
use crate::domain::{Applicant, ApplicationForm, Revision};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
///
/// Hands out the per-entity repositories and owns the two operations that
/// touch both entities atomically.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get application repository
    fn applications(&self) -> Arc<dyn ApplicationRepository>;

    /// Get revision repository
    fn revisions(&self) -> Arc<dyn RevisionRepository>;

    /// Snapshot the current record, then apply the new field values and
    /// mark the record as mid-revision, as one atomic step.
    async fn edit_with_snapshot(&self, id: &str, form: ApplicationForm) -> AppResult<Applicant>;

    /// Restore the most recent snapshot over the record and consume it,
    /// as one atomic step. Fails NotFound when no snapshot remains.
    async fn restore_latest_snapshot(&self, id: &str) -> AppResult<Applicant>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> AppResult<()>;
}

/// SeaORM-backed unit of work
pub struct Persistence {
    db: DatabaseConnection,
    application_repo: Arc<ApplicationStore>,
    revision_repo: Arc<RevisionStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let application_repo = Arc::new(ApplicationStore::new(db.clone()));
        let revision_repo = Arc::new(RevisionStore::new(db.clone()));
        Self {
            db,
            application_repo,
            revision_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.application_repo.clone()
    }

    fn revisions(&self) -> Arc<dyn RevisionRepository> {
        self.revision_repo.clone()
    }

    async fn edit_with_snapshot(&self, id: &str, form: ApplicationForm) -> AppResult<Applicant> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let model = application::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut app = Applicant::from(model.clone());
        let snapshot = app.snapshot(Utc::now().timestamp_millis());
        revision::ActiveModel::from(snapshot)
            .insert(&txn)
            .await
            .map_err(AppError::from)?;

        app.apply_edit(form);

        let mut active: application::ActiveModel = model.into();
        active.name = Set(app.name.clone());
        active.address = Set(app.address.clone());
        active.region = Set(app.region.clone());
        active.status = Set(app.status.to_string());
        active.update(&txn).await.map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;

        Ok(app)
    }

    async fn restore_latest_snapshot(&self, id: &str) -> AppResult<Applicant> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let rev_model = revision::Entity::find()
            .filter(revision::Column::ApplicationId.eq(id))
            .order_by_desc(revision::Column::RevisionTime)
            // same-millisecond snapshots fall back to insertion order
            .order_by_desc(revision::Column::Id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let app_model = application::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let consumed_id = rev_model.id;
        let mut app = Applicant::from(app_model.clone());
        app.restore(Revision::from(rev_model));

        let mut active: application::ActiveModel = app_model.into();
        active.name = Set(app.name.clone());
        active.address = Set(app.address.clone());
        active.region = Set(app.region.clone());
        active.submission_time = Set(app.submission_time);
        active.status = Set(app.status.to_string());
        active.update(&txn).await.map_err(AppError::from)?;

        revision::Entity::delete_by_id(consumed_id)
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;

        Ok(app)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
