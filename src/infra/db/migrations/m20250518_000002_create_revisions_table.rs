//! Migration: Create the ktp_revisions table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Revisions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Revisions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Revisions::ApplicationId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Revisions::Name).string().not_null())
                    .col(ColumnDef::new(Revisions::Address).string().not_null())
                    .col(ColumnDef::new(Revisions::Region).string().not_null())
                    .col(
                        ColumnDef::new(Revisions::SubmissionTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Revisions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Revisions::RevisionTime)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Undo pops the highest revision_time per application id
        manager
            .create_index(
                Index::create()
                    .name("idx_ktp_revisions_application_id_revision_time")
                    .table(Revisions::Table)
                    .col(Revisions::ApplicationId)
                    .col(Revisions::RevisionTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Revisions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Revisions {
    #[iden = "ktp_revisions"]
    Table,
    Id,
    ApplicationId,
    Name,
    Address,
    Region,
    SubmissionTime,
    Status,
    RevisionTime,
}
