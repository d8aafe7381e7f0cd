//! Create rentals table

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_ebikes::Ebikes;
use super::m20250301_000003_create_renters::Renters;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rentals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rentals::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rentals::EbikeId).string().not_null())
                    .col(ColumnDef::new(Rentals::RenterId).string().not_null())
                    .col(ColumnDef::new(Rentals::StationId).string().not_null())
                    .col(
                        ColumnDef::new(Rentals::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rentals::EndTime).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Rentals::RentalFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rentals::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rentals_ebike")
                            .from(Rentals::Table, Rentals::EbikeId)
                            .to(Ebikes::Table, Ebikes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rentals_renter")
                            .from(Rentals::Table, Rentals::RenterId)
                            .to(Renters::Table, Renters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index for querying open rentals
        manager
            .create_index(
                Index::create()
                    .name("idx_rentals_status")
                    .table(Rentals::Table)
                    .col(Rentals::Status)
                    .to_owned(),
            )
            .await?;

        // Create index for renter history
        manager
            .create_index(
                Index::create()
                    .name("idx_rentals_renter")
                    .table(Rentals::Table)
                    .col(Rentals::RenterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rentals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rentals {
    Table,
    Id,
    EbikeId,
    RenterId,
    StationId,
    StartTime,
    EndTime,
    RentalFee,
    Status,
}
