//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence. The
//! interface is defined once and implemented by two swappable backends:
//! the SeaORM relational store and the local JSON file store.

mod application_repository;
pub(crate) mod entities;
mod json_store;
mod revision_repository;

pub use application_repository::{ApplicationRepository, ApplicationStore};
pub use json_store::{JsonApplicationStore, JsonPersistence, JsonRevisionStore};
pub use revision_repository::{RevisionRepository, RevisionStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use application_repository::MockApplicationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use revision_repository::MockRevisionRepository;
