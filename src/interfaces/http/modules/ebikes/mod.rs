//! Ebike module — fleet unit CRUD and lock control

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
