//! Pricing DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::RatePlan;

/// The active tiered rate plan
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatePlanResponse {
    /// Flat fee covering the first tier (whole currency units)
    pub base_fee: i64,
    /// Minutes covered by the base fee
    pub base_minutes: i64,
    /// Fee per additional started hour
    pub hourly_rate: i64,
    pub currency: String,
}

impl From<&RatePlan> for RatePlanResponse {
    fn from(p: &RatePlan) -> Self {
        Self {
            base_fee: p.base_fee,
            base_minutes: p.base_minutes,
            hourly_rate: p.hourly_rate,
            currency: p.currency.clone(),
        }
    }
}

/// Two years, the longest preview that makes sense to quote
pub const MAX_PREVIEW_MINUTES: i64 = 2 * 365 * 24 * 60;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FeePreviewRequest {
    /// Hypothetical rental length in minutes
    #[validate(range(
        min = 0,
        max = 1_051_200,
        message = "duration_minutes must be between 0 and 1051200"
    ))]
    pub duration_minutes: i64,
}

/// Fee a rental of the given length would cost
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeePreviewResponse {
    pub duration_minutes: i64,
    pub duration: String,
    pub fee: i64,
    pub formatted_fee: String,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_accepts_the_full_allowed_range() {
        for minutes in [0, 90, MAX_PREVIEW_MINUTES] {
            let req = FeePreviewRequest {
                duration_minutes: minutes,
            };
            assert!(req.validate().is_ok(), "minutes = {}", minutes);
        }
    }

    #[test]
    fn preview_rejects_negative_and_oversized_durations() {
        for minutes in [-1, MAX_PREVIEW_MINUTES + 1, i64::MAX] {
            let req = FeePreviewRequest {
                duration_minutes: minutes,
            };
            assert!(req.validate().is_err(), "minutes = {}", minutes);
        }
    }
}
