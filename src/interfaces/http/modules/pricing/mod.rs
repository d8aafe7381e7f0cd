//! Pricing module — the active rate plan and fee previews

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
