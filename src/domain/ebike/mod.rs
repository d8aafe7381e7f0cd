//! Ebike aggregate

pub mod model;
pub mod repository;

pub use model::{Ebike, EbikeStatus};
pub use repository::EbikeRepository;
