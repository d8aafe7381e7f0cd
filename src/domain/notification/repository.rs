//! Notification setting repository interface

use async_trait::async_trait;

use super::model::NotificationSetting;
use crate::shared::types::errors::DomainResult;

#[async_trait]
pub trait NotificationSettingRepository: Send + Sync {
    async fn save(&self, setting: NotificationSetting) -> DomainResult<NotificationSetting>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<NotificationSetting>>;
    async fn update(&self, setting: NotificationSetting) -> DomainResult<()>;
    async fn find_all(&self) -> DomainResult<Vec<NotificationSetting>>;
}
