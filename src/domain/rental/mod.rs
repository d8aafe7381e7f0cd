//! Rental aggregate
//!
//! Contains the Rental entity, its lifecycle state machine, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{Rental, RentalStatus};
pub use repository::RentalRepository;
