//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod application;
pub mod revision;
pub mod stats;

pub use application::{
    Applicant, ApplicationForm, ApplicationResponse, ApplicationStatus, SortKey,
};
pub use revision::{Revision, RevisionResponse};
pub use stats::{DailyCount, RegionCount, Statistics, StatusCounts};
