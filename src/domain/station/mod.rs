//! Station aggregate

pub mod model;
pub mod repository;

pub use model::Station;
pub use repository::StationRepository;
