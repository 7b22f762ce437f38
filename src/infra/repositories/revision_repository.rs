//! Revision repository: the per-application undo stack.
//!
//! The stack is explicit: push on edit, the entry with the highest
//! revision_time is the top, entries are deleted once consumed.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::entities::revision::{self, Entity as RevisionEntity};
use crate::domain::Revision;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Revision repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RevisionRepository: Send + Sync {
    /// Push a snapshot onto the application's stack
    async fn push(&self, snapshot: Revision) -> AppResult<()>;

    /// Peek the most recent snapshot for an application, if any
    async fn latest(&self, application_id: &str) -> AppResult<Option<Revision>>;

    /// Number of snapshots currently stacked for an application
    async fn depth(&self, application_id: &str) -> AppResult<u64>;
}

/// SeaORM-backed implementation of RevisionRepository
pub struct RevisionStore {
    db: DatabaseConnection,
}

impl RevisionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RevisionRepository for RevisionStore {
    async fn push(&self, snapshot: Revision) -> AppResult<()> {
        revision::ActiveModel::from(snapshot)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn latest(&self, application_id: &str) -> AppResult<Option<Revision>> {
        let result = RevisionEntity::find()
            .filter(revision::Column::ApplicationId.eq(application_id))
            .order_by_desc(revision::Column::RevisionTime)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Revision::from))
    }

    async fn depth(&self, application_id: &str) -> AppResult<u64> {
        RevisionEntity::find()
            .filter(revision::Column::ApplicationId.eq(application_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
