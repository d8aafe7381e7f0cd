//! Ebike domain entity

use chrono::{DateTime, Utc};

use crate::shared::types::errors::{DomainError, DomainResult};

/// Ebike status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EbikeStatus {
    /// Docked and rentable
    Available,
    /// Docked but locked by an operator
    Locked,
    /// Checked out on an active rental
    InUse,
    /// Pulled from service
    Maintenance,
}

impl Default for EbikeStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl EbikeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Locked => "Locked",
            Self::InUse => "In-Use",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "available" => Some(Self::Available),
            "locked" => Some(Self::Locked),
            "in-use" | "inuse" | "in_use" => Some(Self::InUse),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for EbikeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for EbikeStatus {
    fn from(s: &str) -> Self {
        // Unrecognized stored statuses read back as Maintenance so a
        // corrupted row can never look rentable.
        Self::from_str(s).unwrap_or(Self::Maintenance)
    }
}

/// A physical bike in the fleet
#[derive(Debug, Clone)]
pub struct Ebike {
    /// Unique bike ID
    pub id: String,
    /// Station the bike is docked at (or was taken from)
    pub station_id: String,
    /// Battery charge, 0 to 100
    pub battery_level: i32,
    pub status: EbikeStatus,
    /// Physical lock state, kept consistent with `status == Locked`
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ebike {
    pub fn new(id: impl Into<String>, station_id: impl Into<String>, battery_level: i32) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            station_id: station_id.into(),
            battery_level,
            status: EbikeStatus::Available,
            locked: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Short display form, e.g. `EBK-9F3A`
    pub fn display_id(&self) -> String {
        let prefix: String = self.id.chars().take(4).collect();
        format!("EBK-{}", prefix.to_uppercase())
    }

    pub fn is_available(&self) -> bool {
        self.status == EbikeStatus::Available
    }

    /// Set the status and keep the physical lock flag in step with it.
    pub fn set_status(&mut self, status: EbikeStatus) {
        self.status = status;
        self.locked = status == EbikeStatus::Locked;
        self.updated_at = Utc::now();
    }

    pub fn lock(&mut self) -> DomainResult<()> {
        if self.status != EbikeStatus::Available {
            return Err(DomainError::Validation(format!(
                "Cannot lock bike in status {}",
                self.status
            )));
        }
        self.set_status(EbikeStatus::Locked);
        Ok(())
    }

    pub fn unlock(&mut self) -> DomainResult<()> {
        if self.status != EbikeStatus::Locked {
            return Err(DomainError::Validation(format!(
                "Cannot unlock bike in status {}",
                self.status
            )));
        }
        self.set_status(EbikeStatus::Available);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bike() -> Ebike {
        Ebike::new("9f3a42d0-0000-0000-0000-000000000000", "station-1", 87)
    }

    #[test]
    fn new_bike_is_available_and_unlocked() {
        let b = sample_bike();
        assert!(b.is_available());
        assert!(!b.locked);
        assert_eq!(b.battery_level, 87);
    }

    #[test]
    fn display_id_uses_first_four_chars() {
        let b = sample_bike();
        assert_eq!(b.display_id(), "EBK-9F3A");
    }

    #[test]
    fn lock_and_unlock_keep_flag_consistent() {
        let mut b = sample_bike();
        b.lock().unwrap();
        assert_eq!(b.status, EbikeStatus::Locked);
        assert!(b.locked);

        b.unlock().unwrap();
        assert_eq!(b.status, EbikeStatus::Available);
        assert!(!b.locked);
    }

    #[test]
    fn cannot_lock_bike_in_use() {
        let mut b = sample_bike();
        b.set_status(EbikeStatus::InUse);
        assert!(b.lock().is_err());
    }

    #[test]
    fn cannot_unlock_available_bike() {
        let mut b = sample_bike();
        assert!(b.unlock().is_err());
    }

    #[test]
    fn status_string_forms() {
        assert_eq!(EbikeStatus::InUse.as_str(), "In-Use");
        assert_eq!(EbikeStatus::from("In-Use"), EbikeStatus::InUse);
        assert_eq!(EbikeStatus::from("maintenance"), EbikeStatus::Maintenance);
        assert_eq!(EbikeStatus::from_str("Available"), Some(EbikeStatus::Available));
        assert_eq!(EbikeStatus::from_str("???"), None);
    }

    #[test]
    fn unknown_stored_status_reads_back_unrentable() {
        let status = EbikeStatus::from("corrupted-value");
        assert_eq!(status, EbikeStatus::Maintenance);

        let mut b = sample_bike();
        b.set_status(status);
        assert!(!b.is_available());
    }
}
