//! Notification setting DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::NotificationSetting;

/// One operator-facing notification toggle
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationSettingResponse {
    /// Stable slug, e.g. `rental-reminders`
    pub id: String,
    pub label: String,
    pub description: String,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationSetting> for NotificationSettingResponse {
    fn from(s: NotificationSetting) -> Self {
        Self {
            id: s.id,
            label: s.label,
            description: s.description,
            active: s.active,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNotificationSettingRequest {
    pub active: bool,
}
