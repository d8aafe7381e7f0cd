//! SeaORM implementation of NotificationSettingRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::debug;

use crate::domain::notification::{NotificationSetting, NotificationSettingRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::notification_setting;

pub struct SeaOrmNotificationSettingRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationSettingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: notification_setting::Model) -> NotificationSetting {
    NotificationSetting {
        id: m.id,
        label: m.label,
        description: m.description,
        active: m.active,
        updated_at: m.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Persistence(format!("Database error: {}", e))
}

// ── NotificationSettingRepository impl ──────────────────────────

#[async_trait]
impl NotificationSettingRepository for SeaOrmNotificationSettingRepository {
    async fn save(&self, s: NotificationSetting) -> DomainResult<NotificationSetting> {
        debug!("Saving notification setting: {}", s.id);
        let model = notification_setting::ActiveModel {
            id: Set(s.id),
            label: Set(s.label),
            description: Set(s.description),
            active: Set(s.active),
            updated_at: Set(s.updated_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<NotificationSetting>> {
        let model = notification_setting::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, s: NotificationSetting) -> DomainResult<()> {
        debug!("Updating notification setting: {}", s.id);

        let existing = notification_setting::Entity::find_by_id(&s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("NotificationSetting", &s.id));
        }

        let model = notification_setting::ActiveModel {
            id: Set(s.id),
            label: Set(s.label),
            description: Set(s.description),
            active: Set(s.active),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<NotificationSetting>> {
        let models = notification_setting::Entity::find()
            .order_by_asc(notification_setting::Column::Label)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
