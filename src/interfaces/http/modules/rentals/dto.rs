//! Rental DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Accrual, RatePlan, Rental};

/// One checkout-to-return cycle
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RentalResponse {
    pub id: String,
    pub ebike_id: String,
    pub renter_id: String,
    pub station_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Zero while the rental runs, frozen at settlement
    pub rental_fee: i64,
    pub formatted_fee: String,
    pub status: String,
    /// Whether a settlement payment exists for this rental
    pub paid: bool,
    /// `Xh Ym` for settled rentals; absent while the rental runs
    pub duration: Option<String>,
}

impl RentalResponse {
    /// Build a response; `paid` comes from Payment existence, duration
    /// from the frozen interval when the rental has ended.
    pub fn build(rental: Rental, paid: bool, rate_plan: &RatePlan) -> Self {
        let duration = rental
            .end_time
            .map(|end| rate_plan.accrue(rental.start_time, end).format_duration());
        Self {
            formatted_fee: rate_plan.format_amount(rental.rental_fee),
            duration,
            paid,
            id: rental.id,
            ebike_id: rental.ebike_id,
            renter_id: rental.renter_id,
            station_id: rental.station_id,
            start_time: rental.start_time,
            end_time: rental.end_time,
            rental_fee: rental.rental_fee,
            status: rental.status.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartRentalRequest {
    #[validate(length(min = 1, max = 64, message = "ebike_id is required"))]
    pub ebike_id: String,
    #[validate(length(min = 1, max = 64, message = "station_id is required"))]
    pub station_id: String,
}

/// Live duration and fee for display polling
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccrualResponse {
    pub rental_id: String,
    pub status: String,
    /// Authoritative billing quantity
    pub elapsed_minutes: i64,
    pub elapsed_seconds: i64,
    /// `Xh Ym`
    pub duration: String,
    /// `Xh Ym Zs`, for the live counter
    pub duration_precise: String,
    pub fee: i64,
    pub formatted_fee: String,
}

impl AccrualResponse {
    pub fn build(rental_id: String, status: String, accrual: Accrual, rate_plan: &RatePlan) -> Self {
        Self {
            rental_id,
            status,
            elapsed_minutes: accrual.elapsed_minutes,
            elapsed_seconds: accrual.elapsed_seconds,
            duration: accrual.format_duration(),
            duration_precise: accrual.format_duration_with_seconds(),
            fee: accrual.fee,
            formatted_fee: rate_plan.format_amount(accrual.fee),
        }
    }
}

/// One entry from the accrual monitor's snapshot map
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccrualSnapshotResponse {
    pub rental_id: String,
    pub elapsed_minutes: i64,
    pub elapsed_seconds: i64,
    /// `Xh Ym`
    pub duration: String,
    pub fee: i64,
    pub formatted_fee: String,
}

impl AccrualSnapshotResponse {
    pub fn build(rental_id: String, accrual: Accrual, rate_plan: &RatePlan) -> Self {
        Self {
            rental_id,
            elapsed_minutes: accrual.elapsed_minutes,
            elapsed_seconds: accrual.elapsed_seconds,
            duration: accrual.format_duration(),
            formatted_fee: rate_plan.format_amount(accrual.fee),
            fee: accrual.fee,
        }
    }
}

/// Fleet-wide rental figures for the dashboard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RentalStatsResponse {
    pub total_rentals: u64,
    pub active_rentals: u64,
    pub overdue_rentals: u64,
    /// Sum of settled fees (whole currency units)
    pub total_revenue: i64,
    pub formatted_revenue: String,
}

/// Filters for the admin rental listing
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct RentalListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Only rentals in this status (`active`, `completed`, `overdue`)
    pub status: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}
