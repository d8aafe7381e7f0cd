//! Ebike repository interface

use async_trait::async_trait;

use super::model::{Ebike, EbikeStatus};
use crate::shared::types::errors::DomainResult;
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait EbikeRepository: Send + Sync {
    async fn save(&self, ebike: Ebike) -> DomainResult<Ebike>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Ebike>>;
    async fn update(&self, ebike: Ebike) -> DomainResult<()>;
    async fn find_all(&self) -> DomainResult<Vec<Ebike>>;
    async fn find_page(
        &self,
        params: PaginationParams,
        station_id: Option<&str>,
        status: Option<EbikeStatus>,
    ) -> DomainResult<PaginatedResult<Ebike>>;
    async fn find_by_station(&self, station_id: &str) -> DomainResult<Vec<Ebike>>;
    async fn find_available(&self) -> DomainResult<Vec<Ebike>>;
    /// Conditional status swap: flips `from` to `to` only if the bike is
    /// still in `from`, returning whether this caller won the write.
    async fn set_status_if(
        &self,
        id: &str,
        from: EbikeStatus,
        to: EbikeStatus,
    ) -> DomainResult<bool>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
