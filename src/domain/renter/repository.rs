//! Renter repository interface

use async_trait::async_trait;

use super::model::Renter;
use crate::shared::types::errors::DomainResult;
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait RenterRepository: Send + Sync {
    async fn save(&self, renter: Renter) -> DomainResult<Renter>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Renter>>;
    async fn update(&self, renter: Renter) -> DomainResult<()>;
    async fn find_all(&self) -> DomainResult<Vec<Renter>>;
    async fn find_page(&self, params: PaginationParams) -> DomainResult<PaginatedResult<Renter>>;
}
