//! Notification setting domain entity

use chrono::{DateTime, Utc};

/// One operator-facing notification toggle
#[derive(Debug, Clone)]
pub struct NotificationSetting {
    /// Stable slug, e.g. `rental-reminders`
    pub id: String,
    pub label: String,
    pub description: String,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl NotificationSetting {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            active,
            updated_at: Utc::now(),
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }

    /// The stock settings a fresh install starts with
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "rental-reminders",
                "Rental Time Reminders",
                "Notify renters before their rental period ends.",
                true,
            ),
            Self::new(
                "payment-due",
                "Payment Due Notices",
                "Send automated reminders for overdue payments.",
                true,
            ),
            Self::new(
                "lock-warnings",
                "Lock Warnings",
                "Warn users before an e-bike is locked due to non-payment.",
                false,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_three_toggles() {
        let defaults = NotificationSetting::defaults();
        let ids: Vec<&str> = defaults.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["rental-reminders", "payment-due", "lock-warnings"]);
        assert!(!defaults[2].active);
    }

    #[test]
    fn set_active_flips_and_timestamps() {
        let mut s = NotificationSetting::defaults().remove(2);
        let before = s.updated_at;
        s.set_active(true);
        assert!(s.active);
        assert!(s.updated_at >= before);
    }
}
