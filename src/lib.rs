//! # PedalPoint Fleet Rental Service
//!
//! Backend service for operating a shared e-bike rental fleet: station
//! and bike inventory, renter accounts, rental lifecycle with tiered fee
//! accrual, and payment records.
//!
//! ## Architecture
//!
//! - **domain**: Entities, status machines, repository traits
//! - **application**: The rental engine and background tasks
//! - **infrastructure**: SeaORM persistence, in-memory store, JWT helpers
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors, pagination, clock, shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export the pieces main() wires together
pub use application::services::{AccrualMonitor, AccrualMonitorConfig, RentalService};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::database::{init_database, DatabaseConfig};
pub use infrastructure::storage::InMemoryRepositoryProvider;
pub use interfaces::http::create_api_router;
