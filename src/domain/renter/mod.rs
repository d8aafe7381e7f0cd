//! Renter aggregate

pub mod model;
pub mod repository;

pub use model::{Renter, RenterStatus};
pub use repository::RenterRepository;
