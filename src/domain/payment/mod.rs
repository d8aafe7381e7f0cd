//! Payment aggregate

pub mod model;
pub mod repository;

pub use model::{Payment, PaymentStatus};
pub use repository::PaymentRepository;
