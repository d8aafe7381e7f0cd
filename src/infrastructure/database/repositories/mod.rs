//! SeaORM repository implementations

pub mod ebike_repository;
pub mod notification_setting_repository;
pub mod payment_repository;
pub mod rental_repository;
pub mod renter_repository;
pub mod repository_provider;
pub mod station_repository;

pub use ebike_repository::SeaOrmEbikeRepository;
pub use notification_setting_repository::SeaOrmNotificationSettingRepository;
pub use payment_repository::SeaOrmPaymentRepository;
pub use rental_repository::SeaOrmRentalRepository;
pub use renter_repository::SeaOrmRenterRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use station_repository::SeaOrmStationRepository;
