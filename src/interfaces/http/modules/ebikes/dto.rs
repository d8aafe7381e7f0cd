//! Ebike DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Ebike;

/// A fleet bike
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EbikeResponse {
    pub id: String,
    /// Short display form, e.g. `EBK-9F3A`
    pub display_id: String,
    pub station_id: String,
    pub battery_level: i32,
    pub status: String,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ebike> for EbikeResponse {
    fn from(b: Ebike) -> Self {
        Self {
            display_id: b.display_id(),
            id: b.id,
            station_id: b.station_id,
            battery_level: b.battery_level,
            status: b.status.to_string(),
            locked: b.locked,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEbikeRequest {
    #[validate(length(min = 1, max = 64, message = "station_id is required"))]
    pub station_id: String,
    #[validate(range(min = 0, max = 100, message = "battery_level must be 0..100"))]
    pub battery_level: i32,
}

/// Filters for the admin bike listing
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct EbikeListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Only bikes docked at this station
    pub station_id: Option<String>,
    /// Only bikes in this status (`Available`, `Locked`, `In-Use`, `Maintenance`)
    pub status: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}
