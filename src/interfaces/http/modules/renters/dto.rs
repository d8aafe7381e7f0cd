//! Renter DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Renter;

/// A rider account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RenterResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub date_joined: DateTime<Utc>,
}

impl From<Renter> for RenterResponse {
    fn from(r: Renter) -> Self {
        Self {
            full_name: r.full_name(),
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            status: r.status.to_string(),
            date_joined: r.date_joined,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRenterRequest {
    /// Identity-provider subject to register under; generated when absent
    #[validate(length(min = 1, max = 64))]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 50, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "last_name is required"))]
    pub last_name: String,
    #[validate(email(message = "email must be valid"))]
    pub email: String,
    #[validate(length(min = 5, max = 30, message = "phone is required"))]
    pub phone: String,
}
