//! Create ebikes table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_stations::Stations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ebikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ebikes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ebikes::StationId).string().not_null())
                    .col(
                        ColumnDef::new(Ebikes::BatteryLevel)
                            .integer()
                            .not_null()
                            .default(100),
                    )
                    .col(
                        ColumnDef::new(Ebikes::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .col(
                        ColumnDef::new(Ebikes::Locked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Ebikes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Ebikes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ebikes_station")
                            .from(Ebikes::Table, Ebikes::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index for station dock listings
        manager
            .create_index(
                Index::create()
                    .name("idx_ebikes_station")
                    .table(Ebikes::Table)
                    .col(Ebikes::StationId)
                    .to_owned(),
            )
            .await?;

        // Create index for availability queries
        manager
            .create_index(
                Index::create()
                    .name("idx_ebikes_status")
                    .table(Ebikes::Table)
                    .col(Ebikes::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ebikes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Ebikes {
    Table,
    Id,
    StationId,
    BatteryLevel,
    Status,
    Locked,
    CreatedAt,
    UpdatedAt,
}
