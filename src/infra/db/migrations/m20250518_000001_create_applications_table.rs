//! Migration: Create the ktp_applications table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::Name).string().not_null())
                    .col(ColumnDef::new(Applications::Address).string().not_null())
                    .col(ColumnDef::new(Applications::Region).string().not_null())
                    .col(
                        ColumnDef::new(Applications::SubmissionTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::Status).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Default listing order and the region sort both hit these columns
        manager
            .create_index(
                Index::create()
                    .name("idx_ktp_applications_submission_time")
                    .table(Applications::Table)
                    .col(Applications::SubmissionTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ktp_applications_region")
                    .table(Applications::Table)
                    .col(Applications::Region)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Applications {
    #[iden = "ktp_applications"]
    Table,
    Id,
    Name,
    Address,
    Region,
    SubmissionTime,
    Status,
}
