//! Station DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Station;

/// A docking location
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StationResponse {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub parking_bays: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Station> for StationResponse {
    fn from(s: Station) -> Self {
        Self {
            id: s.id,
            name: s.name,
            latitude: s.latitude,
            longitude: s.longitude,
            parking_bays: s.parking_bays,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStationRequest {
    #[validate(length(min = 1, max = 100, message = "station name is required"))]
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be -90..90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be -180..180"))]
    pub longitude: f64,
    #[validate(range(min = 1, message = "parking_bays must be at least 1"))]
    pub parking_bays: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStationRequest {
    #[validate(length(min = 1, max = 100, message = "station name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be -90..90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be -180..180"))]
    pub longitude: Option<f64>,
    #[validate(range(min = 1, message = "parking_bays must be at least 1"))]
    pub parking_bays: Option<i32>,
}
