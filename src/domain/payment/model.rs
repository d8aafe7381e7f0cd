//! Payment domain entity

use chrono::{DateTime, Utc};

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Paid
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paid" => Some(Self::Paid),
            "pending" => Some(Self::Pending),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Charge record written once at rental settlement, immutable afterwards
#[derive(Debug, Clone)]
pub struct Payment {
    /// Unique payment ID
    pub id: String,
    pub renter_id: String,
    pub rental_id: String,
    /// Settled amount (whole currency units)
    pub amount: i64,
    pub status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
}

impl Payment {
    /// A settled payment for a closed rental
    pub fn settled(
        id: impl Into<String>,
        renter_id: impl Into<String>,
        rental_id: impl Into<String>,
        amount: i64,
        payment_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            renter_id: renter_id.into(),
            rental_id: rental_id.into(),
            amount,
            status: PaymentStatus::Paid,
            payment_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_payment_is_paid() {
        let p = Payment::settled("p-1", "u-1", "r-1", 220, Utc::now());
        assert_eq!(p.status, PaymentStatus::Paid);
        assert_eq!(p.amount, 220);
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            PaymentStatus::Paid,
            PaymentStatus::Pending,
            PaymentStatus::Failed,
        ] {
            assert_eq!(PaymentStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(PaymentStatus::from_str("refunded"), None);
    }
}
