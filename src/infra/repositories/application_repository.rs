//! Application repository: interface plus the SeaORM-backed implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::application::{self, Entity as ApplicationEntity};
use crate::domain::{Applicant, SortKey};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Application repository trait for dependency injection.
///
/// The same interface is implemented by the relational store and by the
/// JSON file store; callers never see which one they are talking to.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find an application by id
    async fn get(&self, id: &str) -> AppResult<Option<Applicant>>;

    /// List all applications in the backend's natural order
    async fn list(&self) -> AppResult<Vec<Applicant>>;

    /// List all applications ordered by the given key.
    ///
    /// The relational backend requests ordered results; the file backend
    /// additionally persists the new ordering.
    async fn list_sorted(&self, key: SortKey) -> AppResult<Vec<Applicant>>;

    /// Insert a new application; fails with a conflict if the id exists
    async fn insert(&self, application: Applicant) -> AppResult<Applicant>;

    /// Overwrite an existing application's fields
    async fn update(&self, application: Applicant) -> AppResult<Applicant>;

    /// Remove an application by id
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// SeaORM-backed implementation of ApplicationRepository
pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn get(&self, id: &str) -> AppResult<Option<Applicant>> {
        let result = ApplicationEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Applicant::from))
    }

    async fn list(&self) -> AppResult<Vec<Applicant>> {
        let models = ApplicationEntity::find()
            .order_by_asc(application::Column::SubmissionTime)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Applicant::from).collect())
    }

    async fn list_sorted(&self, key: SortKey) -> AppResult<Vec<Applicant>> {
        let query = match key {
            SortKey::Region => {
                ApplicationEntity::find().order_by_asc(application::Column::Region)
            }
            SortKey::Time => {
                ApplicationEntity::find().order_by_asc(application::Column::SubmissionTime)
            }
        };

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(Applicant::from).collect())
    }

    async fn insert(&self, application: Applicant) -> AppResult<Applicant> {
        let existing = ApplicationEntity::find_by_id(application.id.as_str())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        if existing.is_some() {
            return Err(AppError::conflict("Application"));
        }

        let model = application::ActiveModel::from(application)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Applicant::from(model))
    }

    async fn update(&self, application: Applicant) -> AppResult<Applicant> {
        let existing = ApplicationEntity::find_by_id(application.id.as_str())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: application::ActiveModel = existing.into();
        active.name = Set(application.name);
        active.address = Set(application.address);
        active.region = Set(application.region);
        active.submission_time = Set(application.submission_time);
        active.status = Set(application.status.to_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Applicant::from(model))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = ApplicationEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
