//! Payment repository interface

use async_trait::async_trait;

use super::model::Payment;
use crate::shared::types::errors::DomainResult;
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: Payment) -> DomainResult<Payment>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Payment>>;
    /// The settlement record for a rental, if it has one (the `paid` flag)
    async fn find_by_rental(&self, rental_id: &str) -> DomainResult<Option<Payment>>;
    async fn find_by_renter(&self, renter_id: &str) -> DomainResult<Vec<Payment>>;
    async fn find_page(&self, params: PaginationParams) -> DomainResult<PaginatedResult<Payment>>;
}
