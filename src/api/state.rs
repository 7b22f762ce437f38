//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and the
//! configured persistence backend.

use std::sync::Arc;

use crate::infra::UnitOfWork;
use crate::services::{ApplicationService, ReportService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Application use cases
    pub application_service: Arc<dyn ApplicationService>,
    /// Read-side aggregations and search
    pub report_service: Arc<dyn ReportService>,
    /// Persistence backend (health checks, sync channel)
    pub store: Arc<dyn UnitOfWork>,
    /// Internal service container (optional, only with from_store)
    service_container: Option<Arc<Services>>,
}

impl AppState {
    /// Create application state over the configured persistence backend.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_store(store: Arc<dyn UnitOfWork>) -> Self {
        let container = Arc::new(Services::from_store(store.clone()));

        Self {
            application_service: container.applications(),
            report_service: container.reports(),
            store,
            service_container: Some(container),
        }
    }

    /// Create new application state with manually injected services.
    ///
    /// Note: This method does not provide ServiceContainer access.
    /// Use `from_store()` for full functionality.
    pub fn new(
        application_service: Arc<dyn ApplicationService>,
        report_service: Arc<dyn ReportService>,
        store: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            application_service,
            report_service,
            store,
            service_container: None,
        }
    }

    /// Get the service container for centralized service access.
    ///
    /// Returns `Some` only if created via `from_store()`.
    pub fn services(&self) -> Option<&Arc<Services>> {
        self.service_container.as_ref()
    }
}
