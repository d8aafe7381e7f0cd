//! Pricing aggregate
//!
//! The tiered rate plan and the accrual math derived from it.

pub mod model;

pub use model::{Accrual, RatePlan};
