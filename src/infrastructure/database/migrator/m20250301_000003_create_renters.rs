//! Create renters table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Renters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Renters::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Renters::FirstName).string().not_null())
                    .col(ColumnDef::new(Renters::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Renters::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Renters::Phone).string().not_null())
                    .col(
                        ColumnDef::new(Renters::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Renters::DateJoined)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Renters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Renters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Renters {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Status,
    DateJoined,
    UpdatedAt,
}
