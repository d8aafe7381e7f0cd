//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories so services and handlers depend on one seam instead of
//! six constructor arguments.

use super::ebike::EbikeRepository;
use super::notification::NotificationSettingRepository;
use super::payment::PaymentRepository;
use super::rental::RentalRepository;
use super::renter::RenterRepository;
use super::station::StationRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let bike = repos.ebikes().find_by_id("b-01").await?;
///     let open = repos.rentals().find_active_for_renter("u-01").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn stations(&self) -> &dyn StationRepository;
    fn ebikes(&self) -> &dyn EbikeRepository;
    fn renters(&self) -> &dyn RenterRepository;
    fn rentals(&self) -> &dyn RentalRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn notification_settings(&self) -> &dyn NotificationSettingRepository;
}
