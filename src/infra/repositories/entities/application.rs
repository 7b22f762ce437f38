//! Application database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Applicant, ApplicationStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ktp_applications")]
pub struct Model {
    /// `<region>-<epoch millis>`, assigned once at submission
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub address: String,
    pub region: String,
    pub submission_time: i64,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Applicant {
    fn from(model: Model) -> Self {
        Applicant {
            id: model.id,
            name: model.name,
            address: model.address,
            region: model.region,
            submission_time: model.submission_time,
            status: ApplicationStatus::from(model.status.as_str()),
        }
    }
}

/// Build a fully-set active model from a domain entity
impl From<Applicant> for ActiveModel {
    fn from(app: Applicant) -> Self {
        Self {
            id: Set(app.id),
            name: Set(app.name),
            address: Set(app.address),
            region: Set(app.region),
            submission_time: Set(app.submission_time),
            status: Set(app.status.to_string()),
        }
    }
}
