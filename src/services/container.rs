//! Service Container - Centralized service access.
//!
//! Wires the service implementations to the configured persistence
//! backend and hands them out as trait objects.

use std::sync::Arc;

use super::{ApplicationService, ReportService};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get application service
    fn applications(&self) -> Arc<dyn ApplicationService>;

    /// Get report service
    fn reports(&self) -> Arc<dyn ReportService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    application_service: Arc<dyn ApplicationService>,
    report_service: Arc<dyn ReportService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        application_service: Arc<dyn ApplicationService>,
        report_service: Arc<dyn ReportService>,
    ) -> Self {
        Self {
            application_service,
            report_service,
        }
    }

    /// Create service container over the configured store
    pub fn from_store(store: Arc<dyn UnitOfWork>) -> Self {
        use super::{ApplicationManager, ReportManager};

        let application_service = Arc::new(ApplicationManager::new(store.clone()));
        let report_service = Arc::new(ReportManager::new(store));

        Self {
            application_service,
            report_service,
        }
    }
}

impl ServiceContainer for Services {
    fn applications(&self) -> Arc<dyn ApplicationService> {
        self.application_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }
}
