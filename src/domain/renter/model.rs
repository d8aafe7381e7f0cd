//! Renter domain entity

use chrono::{DateTime, Utc};

use crate::shared::types::errors::{DomainError, DomainResult};

/// Renter account status
///
/// Only admin actions move this; nothing auto-transitions an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenterStatus {
    Active,
    Suspended,
    /// Terminal; a deactivated account is never revived
    Deactivated,
}

impl Default for RenterStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl RenterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Deactivated => "deactivated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "deactivated" => Some(Self::Deactivated),
            _ => None,
        }
    }
}

impl std::fmt::Display for RenterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rider account managed by fleet admins
#[derive(Debug, Clone)]
pub struct Renter {
    /// Unique renter ID (the identity provider's subject)
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub status: RenterStatus,
    pub date_joined: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Renter {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            status: RenterStatus::Active,
            date_joined: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether this account may start new rentals
    pub fn can_rent(&self) -> bool {
        self.status == RenterStatus::Active
    }

    pub fn suspend(&mut self) -> DomainResult<()> {
        if self.status != RenterStatus::Active {
            return Err(DomainError::Validation(format!(
                "Cannot suspend renter in status {}",
                self.status
            )));
        }
        self.status = RenterStatus::Suspended;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn unsuspend(&mut self) -> DomainResult<()> {
        if self.status != RenterStatus::Suspended {
            return Err(DomainError::Validation(format!(
                "Cannot unsuspend renter in status {}",
                self.status
            )));
        }
        self.status = RenterStatus::Active;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn deactivate(&mut self) -> DomainResult<()> {
        if self.status == RenterStatus::Deactivated {
            return Err(DomainError::Validation(
                "Renter is already deactivated".to_string(),
            ));
        }
        self.status = RenterStatus::Deactivated;
        self.updated_at = Utc::now();
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_renter() -> Renter {
        Renter::new("u-1", "Alice", "Johnson", "alice@example.com", "+63 917 555 0101")
    }

    #[test]
    fn new_renter_is_active() {
        let r = sample_renter();
        assert!(r.can_rent());
        assert_eq!(r.full_name(), "Alice Johnson");
    }

    #[test]
    fn suspend_then_unsuspend() {
        let mut r = sample_renter();
        r.suspend().unwrap();
        assert_eq!(r.status, RenterStatus::Suspended);
        assert!(!r.can_rent());

        r.unsuspend().unwrap();
        assert_eq!(r.status, RenterStatus::Active);
        assert!(r.can_rent());
    }

    #[test]
    fn deactivate_is_terminal() {
        let mut r = sample_renter();
        r.deactivate().unwrap();
        assert_eq!(r.status, RenterStatus::Deactivated);
        assert!(r.deactivate().is_err());
        assert!(r.suspend().is_err());
        assert!(r.unsuspend().is_err());
    }

    #[test]
    fn suspended_account_can_be_deactivated() {
        let mut r = sample_renter();
        r.suspend().unwrap();
        r.deactivate().unwrap();
        assert_eq!(r.status, RenterStatus::Deactivated);
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            RenterStatus::Active,
            RenterStatus::Suspended,
            RenterStatus::Deactivated,
        ] {
            assert_eq!(RenterStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(RenterStatus::from_str("bogus"), None);
    }
}
