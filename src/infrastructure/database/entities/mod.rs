//! SeaORM entity definitions

pub mod ebike;
pub mod notification_setting;
pub mod payment;
pub mod rental;
pub mod renter;
pub mod station;
