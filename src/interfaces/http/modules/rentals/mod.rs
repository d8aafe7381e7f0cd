//! Rental module — checkout, live accrual, return, admin oversight

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
