//! Station repository interface

use async_trait::async_trait;

use super::model::Station;
use crate::shared::types::errors::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    async fn save(&self, station: Station) -> DomainResult<Station>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Station>>;
    async fn update(&self, station: Station) -> DomainResult<()>;
    async fn find_all(&self) -> DomainResult<Vec<Station>>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
