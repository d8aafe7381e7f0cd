//! Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Payment, RatePlan};

/// A settlement record, written once when a rental closes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: String,
    pub renter_id: String,
    pub rental_id: String,
    /// Whole currency units
    pub amount: i64,
    /// Two-decimal display form, e.g. `₱220.00`
    pub formatted_amount: String,
    pub status: String,
    pub payment_date: DateTime<Utc>,
}

impl PaymentResponse {
    pub fn build(payment: Payment, rate_plan: &RatePlan) -> Self {
        Self {
            formatted_amount: rate_plan.format_amount(payment.amount),
            id: payment.id,
            renter_id: payment.renter_id,
            rental_id: payment.rental_id,
            amount: payment.amount,
            status: payment.status.to_string(),
            payment_date: payment.payment_date,
        }
    }
}
