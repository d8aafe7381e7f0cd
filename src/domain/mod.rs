pub mod ebike;
pub mod notification;
pub mod payment;
pub mod pricing;
pub mod rental;
pub mod renter;
pub mod repositories;
pub mod station;

// Re-export commonly used types
pub use ebike::{Ebike, EbikeRepository, EbikeStatus};
pub use notification::{NotificationSetting, NotificationSettingRepository};
pub use payment::{Payment, PaymentRepository, PaymentStatus};
pub use pricing::{Accrual, RatePlan};
pub use rental::{Rental, RentalRepository, RentalStatus};
pub use renter::{Renter, RenterRepository, RenterStatus};
pub use repositories::RepositoryProvider;
pub use station::{Station, StationRepository};

// Re-export error types from shared for convenience
pub use crate::shared::types::errors::{DomainError, DomainResult};
