//! SeaORM-backed repository provider

use sea_orm::DatabaseConnection;

use crate::domain::ebike::EbikeRepository;
use crate::domain::notification::NotificationSettingRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::rental::RentalRepository;
use crate::domain::renter::RenterRepository;
use crate::domain::station::StationRepository;
use crate::domain::RepositoryProvider;

use super::ebike_repository::SeaOrmEbikeRepository;
use super::notification_setting_repository::SeaOrmNotificationSettingRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::rental_repository::SeaOrmRentalRepository;
use super::renter_repository::SeaOrmRenterRepository;
use super::station_repository::SeaOrmStationRepository;

/// Bundles all SeaORM repositories over one database connection
pub struct SeaOrmRepositoryProvider {
    stations: SeaOrmStationRepository,
    ebikes: SeaOrmEbikeRepository,
    renters: SeaOrmRenterRepository,
    rentals: SeaOrmRentalRepository,
    payments: SeaOrmPaymentRepository,
    notification_settings: SeaOrmNotificationSettingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            stations: SeaOrmStationRepository::new(db.clone()),
            ebikes: SeaOrmEbikeRepository::new(db.clone()),
            renters: SeaOrmRenterRepository::new(db.clone()),
            rentals: SeaOrmRentalRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            notification_settings: SeaOrmNotificationSettingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn stations(&self) -> &dyn StationRepository {
        &self.stations
    }

    fn ebikes(&self) -> &dyn EbikeRepository {
        &self.ebikes
    }

    fn renters(&self) -> &dyn RenterRepository {
        &self.renters
    }

    fn rentals(&self) -> &dyn RentalRepository {
        &self.rentals
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn notification_settings(&self) -> &dyn NotificationSettingRepository {
        &self.notification_settings
    }
}
