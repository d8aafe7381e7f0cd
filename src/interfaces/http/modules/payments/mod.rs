//! Payment module — settlement records (read-only)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
