//! Report service - read-side aggregations and search.
//!
//! Every call is a full-collection scan recomputed from scratch; nothing
//! is maintained incrementally.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Applicant, Statistics};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Report service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Aggregate counts by status, region and day
    async fn statistics(&self) -> AppResult<Statistics>;

    /// Case-insensitive substring search over id and name.
    /// A blank query matches nothing.
    async fn search(&self, query: &str) -> AppResult<Vec<Applicant>>;
}

/// Concrete implementation of ReportService
pub struct ReportManager {
    store: Arc<dyn UnitOfWork>,
}

impl ReportManager {
    /// Create new service instance over the configured store
    pub fn new(store: Arc<dyn UnitOfWork>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReportService for ReportManager {
    async fn statistics(&self) -> AppResult<Statistics> {
        let applications = self.store.applications().list().await?;
        Ok(Statistics::compute(&applications))
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Applicant>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let applications = self.store.applications().list().await?;
        Ok(applications
            .into_iter()
            .filter(|app| app.matches(&needle))
            .collect())
    }
}
