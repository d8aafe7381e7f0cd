//! Rental repository interface

use async_trait::async_trait;

use super::model::{Rental, RentalStatus};
use crate::shared::types::errors::DomainResult;
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn save(&self, rental: Rental) -> DomainResult<Rental>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Rental>>;
    async fn update(&self, rental: Rental) -> DomainResult<()>;
    /// The renter's open rental (active or overdue), if any
    async fn find_active_for_renter(&self, renter_id: &str) -> DomainResult<Option<Rental>>;
    async fn find_by_status(&self, status: RentalStatus) -> DomainResult<Vec<Rental>>;
    /// Full history for one renter, newest start first
    async fn find_by_renter(&self, renter_id: &str) -> DomainResult<Vec<Rental>>;
    async fn find_all(&self) -> DomainResult<Vec<Rental>>;
    async fn find_page(
        &self,
        params: PaginationParams,
        status: Option<RentalStatus>,
    ) -> DomainResult<PaginatedResult<Rental>>;
}
