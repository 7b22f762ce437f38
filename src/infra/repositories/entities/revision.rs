//! Revision database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use crate::domain::{ApplicationStatus, Revision};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ktp_revisions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Id of the application this snapshot belongs to (no foreign key:
    /// snapshots may outlive their application)
    pub application_id: String,
    pub name: String,
    pub address: String,
    pub region: String,
    pub submission_time: i64,
    pub status: String,
    pub revision_time: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain snapshot
impl From<Model> for Revision {
    fn from(model: Model) -> Self {
        Revision {
            application_id: model.application_id,
            name: model.name,
            address: model.address,
            region: model.region,
            submission_time: model.submission_time,
            status: ApplicationStatus::from(model.status.as_str()),
            revision_time: model.revision_time,
        }
    }
}

/// Build an insertable active model from a domain snapshot
impl From<Revision> for ActiveModel {
    fn from(rev: Revision) -> Self {
        Self {
            id: NotSet,
            application_id: Set(rev.application_id),
            name: Set(rev.name),
            address: Set(rev.address),
            region: Set(rev.region),
            submission_time: Set(rev.submission_time),
            status: Set(rev.status.to_string()),
            revision_time: Set(rev.revision_time),
        }
    }
}
