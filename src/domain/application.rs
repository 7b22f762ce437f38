//! Application domain entity and related types.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{STATUS_PENDING, STATUS_REVISION, STATUS_VERIFIED};
use crate::domain::Revision;

/// Lifecycle status of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Verified,
    Revision,
}

impl From<&str> for ApplicationStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_VERIFIED => ApplicationStatus::Verified,
            STATUS_REVISION => ApplicationStatus::Revision,
            _ => ApplicationStatus::Pending,
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "{}", STATUS_PENDING),
            ApplicationStatus::Verified => write!(f, "{}", STATUS_VERIFIED),
            ApplicationStatus::Revision => write!(f, "{}", STATUS_REVISION),
        }
    }
}

/// Sort modes for application listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Lexicographic ascending by region
    Region,
    /// Numeric ascending by submission time
    Time,
}

/// KTP application domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    /// `<region>-<epoch millis>`, assigned at submission and immutable
    pub id: String,
    pub name: String,
    pub address: String,
    pub region: String,
    /// Submission instant in epoch milliseconds
    pub submission_time: i64,
    pub status: ApplicationStatus,
}

impl Applicant {
    /// Create a new pending application from submitted form data.
    ///
    /// The id embeds the region and the current epoch millis. Two
    /// submissions for the same region within the same millisecond collide;
    /// the store's uniqueness constraint surfaces that as a conflict.
    pub fn submit(form: ApplicationForm) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: format!("{}-{}", form.region, now),
            name: form.name,
            address: form.address,
            region: form.region,
            submission_time: now,
            status: ApplicationStatus::Pending,
        }
    }

    /// Overwrite the editable fields and mark the record as mid-revision.
    pub fn apply_edit(&mut self, form: ApplicationForm) {
        self.name = form.name;
        self.address = form.address;
        self.region = form.region;
        self.status = ApplicationStatus::Revision;
    }

    /// Mark the application as verified.
    pub fn verify(&mut self) {
        self.status = ApplicationStatus::Verified;
    }

    /// Capture the current field values as an undo snapshot.
    pub fn snapshot(&self, revision_time: i64) -> Revision {
        Revision {
            application_id: self.id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            region: self.region.clone(),
            submission_time: self.submission_time,
            status: self.status,
            revision_time,
        }
    }

    /// Overwrite all fields (including status) with a stored snapshot.
    pub fn restore(&mut self, snapshot: Revision) {
        self.name = snapshot.name;
        self.address = snapshot.address;
        self.region = snapshot.region;
        self.submission_time = snapshot.submission_time;
        self.status = snapshot.status;
    }

    /// Case-insensitive substring match on id or name.
    pub fn matches(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

/// Application submission/edit data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct ApplicationForm {
    /// Applicant full name
    #[schema(example = "Budi Santoso")]
    pub name: String,
    /// Residential address
    #[schema(example = "Jl. Merdeka No. 12")]
    pub address: String,
    /// Administrative region
    #[schema(example = "Jakarta")]
    pub region: String,
}

/// Application response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationResponse {
    /// Unique application identifier
    #[schema(example = "Jakarta-1747466837000")]
    pub id: String,
    /// Applicant full name
    #[schema(example = "Budi Santoso")]
    pub name: String,
    /// Residential address
    #[schema(example = "Jl. Merdeka No. 12")]
    pub address: String,
    /// Administrative region
    #[schema(example = "Jakarta")]
    pub region: String,
    /// Submission instant in epoch milliseconds
    pub submission_time: i64,
    /// Current lifecycle status
    pub status: ApplicationStatus,
}

impl From<Applicant> for ApplicationResponse {
    fn from(app: Applicant) -> Self {
        Self {
            id: app.id,
            name: app.name,
            address: app.address,
            region: app.region,
            submission_time: app.submission_time,
            status: app.status,
        }
    }
}
