//! Notification settings module — operator toggles

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
