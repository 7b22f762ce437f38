//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - The repository interface and its two persistence backends
//! - Unit of Work for the composite transactional operations

pub mod db;
pub mod repositories;
pub mod unit_of_work;

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::errors::AppResult;

pub use db::{Database, Migrator};
pub use repositories::{
    ApplicationRepository, ApplicationStore, JsonPersistence, RevisionRepository, RevisionStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockApplicationRepository, MockRevisionRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;

/// Build the configured persistence backend.
///
/// Both arms return the same interface; the rest of the application never
/// learns which store it is running against.
pub async fn build_store(config: &Config) -> AppResult<Arc<dyn UnitOfWork>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let db = Database::connect(config).await;
            Ok(Arc::new(Persistence::new(db.get_connection())))
        }
        StorageBackend::File => {
            tracing::info!("Using JSON file store at {}", config.data_dir.display());
            Ok(Arc::new(JsonPersistence::new(&config.data_dir)?))
        }
    }
}
