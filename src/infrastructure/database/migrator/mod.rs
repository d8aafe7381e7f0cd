//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_stations;
mod m20250301_000002_create_ebikes;
mod m20250301_000003_create_renters;
mod m20250301_000004_create_rentals;
mod m20250301_000005_create_payments;
mod m20250301_000006_create_notification_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_stations::Migration),
            Box::new(m20250301_000002_create_ebikes::Migration),
            Box::new(m20250301_000003_create_renters::Migration),
            Box::new(m20250301_000004_create_rentals::Migration),
            Box::new(m20250301_000005_create_payments::Migration),
            Box::new(m20250301_000006_create_notification_settings::Migration),
        ]
    }
}
