//! Create payments table

use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_renters::Renters;
use super::m20250301_000004_create_rentals::Rentals;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::RenterId).string().not_null())
                    .col(ColumnDef::new(Payments::RentalId).string().not_null())
                    .col(ColumnDef::new(Payments::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Payments::Status)
                            .string()
                            .not_null()
                            .default("paid"),
                    )
                    .col(
                        ColumnDef::new(Payments::PaymentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_renter")
                            .from(Payments::Table, Payments::RenterId)
                            .to(Renters::Table, Renters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_rental")
                            .from(Payments::Table, Payments::RentalId)
                            .to(Rentals::Table, Rentals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index for settlement lookups per rental
        manager
            .create_index(
                Index::create()
                    .name("idx_payments_rental")
                    .table(Payments::Table)
                    .col(Payments::RentalId)
                    .to_owned(),
            )
            .await?;

        // Create index for renter payment history
        manager
            .create_index(
                Index::create()
                    .name("idx_payments_renter")
                    .table(Payments::Table)
                    .col(Payments::RenterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Payments {
    Table,
    Id,
    RenterId,
    RentalId,
    Amount,
    Status,
    PaymentDate,
}
