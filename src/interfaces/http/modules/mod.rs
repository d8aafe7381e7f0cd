//! REST API resource modules

pub mod ebikes;
pub mod health;
pub mod metrics;
pub mod notifications;
pub mod payments;
pub mod pricing;
pub mod rentals;
pub mod renters;
pub mod stations;

use std::sync::Arc;

use crate::application::services::{AccrualMonitor, RentalService};
use crate::domain::RepositoryProvider;

/// Shared state for all resource routes
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub rental_service: Arc<RentalService>,
    pub accrual_monitor: Arc<AccrualMonitor>,
}
