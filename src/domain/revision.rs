//! Revision snapshots backing the single-step undo.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ApplicationStatus;

/// Stored snapshot of an application's prior field values.
///
/// Revisions form a stack per application id: pushed on edit, popped on
/// undo, deleted once consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub application_id: String,
    pub name: String,
    pub address: String,
    pub region: String,
    pub submission_time: i64,
    pub status: ApplicationStatus,
    /// Instant the snapshot was taken, in epoch milliseconds. The highest
    /// value per application id is the top of the stack.
    pub revision_time: i64,
}

/// Revision response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevisionResponse {
    /// Id of the application this snapshot belongs to
    #[schema(example = "Jakarta-1747466837000")]
    pub application_id: String,
    pub name: String,
    pub address: String,
    pub region: String,
    pub submission_time: i64,
    pub status: ApplicationStatus,
    pub revision_time: i64,
}

impl From<Revision> for RevisionResponse {
    fn from(rev: Revision) -> Self {
        Self {
            application_id: rev.application_id,
            name: rev.name,
            address: rev.address,
            region: rev.region,
            submission_time: rev.submission_time,
            status: rev.status,
            revision_time: rev.revision_time,
        }
    }
}
