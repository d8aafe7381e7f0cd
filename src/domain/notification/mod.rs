//! Notification settings aggregate

pub mod model;
pub mod repository;

pub use model::NotificationSetting;
pub use repository::NotificationSettingRepository;
