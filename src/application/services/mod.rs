pub mod accrual_monitor;
pub mod overdue_watch;
pub mod rental_service;

pub use accrual_monitor::{AccrualMonitor, AccrualMonitorConfig};
pub use overdue_watch::start_overdue_watch;
pub use rental_service::RentalService;
