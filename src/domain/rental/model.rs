//! Rental domain entity

use chrono::{DateTime, Utc};

use crate::shared::types::errors::{DomainError, DomainResult};

/// Rental status
///
/// `completed` is the only fully terminal state. `overdue` is assigned by
/// the reconciliation task, never by the engine's own end operation, and
/// can still be settled by an admin force-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalStatus {
    /// Bike is checked out and the fee is accruing
    Active,
    /// Returned and settled
    Completed,
    /// Ran past the configured maximum duration without being returned
    Overdue,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Legal one-directional transitions; nothing re-enters `active`.
    pub fn can_transition_to(&self, next: RentalStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Completed)
                | (Self::Active, Self::Overdue)
                | (Self::Overdue, Self::Completed)
        )
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One checkout-to-return cycle of a bike by a renter
#[derive(Debug, Clone)]
pub struct Rental {
    /// Unique rental ID
    pub id: String,
    /// Bike being ridden
    pub ebike_id: String,
    /// Renter who checked it out
    pub renter_id: String,
    /// Station the bike was taken from
    pub station_id: String,
    /// Set once at creation, immutable thereafter
    pub start_time: DateTime<Utc>,
    /// Null while the rental runs, set exactly once at settlement
    pub end_time: Option<DateTime<Utc>>,
    /// Zero while active, fixed at settlement (whole currency units)
    pub rental_fee: i64,
    pub status: RentalStatus,
}

impl Rental {
    pub fn new(
        id: impl Into<String>,
        ebike_id: impl Into<String>,
        renter_id: impl Into<String>,
        station_id: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            ebike_id: ebike_id.into(),
            renter_id: renter_id.into(),
            station_id: station_id.into(),
            start_time,
            end_time: None,
            rental_fee: 0,
            status: RentalStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }

    /// Settle the rental: freeze the fee, stamp the end time, go terminal.
    ///
    /// Allowed from `active` and (for admin force-end) from `overdue`.
    pub fn close(&mut self, end_time: DateTime<Utc>, final_fee: i64) -> DomainResult<()> {
        if !self.status.can_transition_to(RentalStatus::Completed) {
            return Err(DomainError::NotActive(self.id.clone()));
        }
        self.end_time = Some(end_time);
        self.rental_fee = final_fee;
        self.status = RentalStatus::Completed;
        Ok(())
    }

    /// Flag a running rental as overdue. The fee keeps accruing; only a
    /// force-end settles it.
    pub fn mark_overdue(&mut self) -> DomainResult<()> {
        if !self.status.can_transition_to(RentalStatus::Overdue) {
            return Err(DomainError::Validation(format!(
                "Invalid rental status transition: {} to overdue",
                self.status
            )));
        }
        self.status = RentalStatus::Overdue;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rental() -> Rental {
        Rental::new("r-1", "bike-1", "renter-1", "station-1", Utc::now())
    }

    #[test]
    fn new_rental_is_active_with_zero_fee() {
        let r = sample_rental();
        assert!(r.is_active());
        assert_eq!(r.rental_fee, 0);
        assert!(r.end_time.is_none());
    }

    #[test]
    fn close_sets_terminal_state() {
        let mut r = sample_rental();
        let end = r.start_time + chrono::Duration::minutes(125);
        r.close(end, 220).unwrap();
        assert_eq!(r.status, RentalStatus::Completed);
        assert_eq!(r.rental_fee, 220);
        assert_eq!(r.end_time, Some(end));
        assert!(!r.is_active());
    }

    #[test]
    fn close_twice_fails() {
        let mut r = sample_rental();
        r.close(Utc::now(), 120).unwrap();
        let err = r.close(Utc::now(), 120).unwrap_err();
        assert!(matches!(err, DomainError::NotActive(_)));
    }

    #[test]
    fn overdue_rental_can_still_be_closed() {
        let mut r = sample_rental();
        r.mark_overdue().unwrap();
        assert_eq!(r.status, RentalStatus::Overdue);
        r.close(Utc::now(), 170).unwrap();
        assert_eq!(r.status, RentalStatus::Completed);
    }

    #[test]
    fn completed_rental_cannot_go_overdue() {
        let mut r = sample_rental();
        r.close(Utc::now(), 120).unwrap();
        assert!(r.mark_overdue().is_err());
    }

    #[test]
    fn no_transition_re_enters_active() {
        for status in [RentalStatus::Completed, RentalStatus::Overdue] {
            assert!(!status.can_transition_to(RentalStatus::Active));
        }
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            RentalStatus::Active,
            RentalStatus::Completed,
            RentalStatus::Overdue,
        ] {
            assert_eq!(RentalStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(RentalStatus::from_str("Active"), Some(RentalStatus::Active));
        assert_eq!(RentalStatus::from_str("paid"), None);
    }

    #[test]
    fn only_completed_is_terminal() {
        assert!(RentalStatus::Completed.is_terminal());
        assert!(!RentalStatus::Active.is_terminal());
        assert!(!RentalStatus::Overdue.is_terminal());
    }
}
