//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod application_service;
pub mod container;
mod report_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use application_service::{ApplicationManager, ApplicationService};
pub use report_service::{ReportManager, ReportService};

#[cfg(any(test, feature = "test-utils"))]
pub use application_service::MockApplicationService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use report_service::MockReportService;
