//! Rate plan domain entity
//!
//! Tiered rental pricing: a flat base fee covers the first hour, then
//! every additional hour (or any fraction of one) adds a fixed step.

use chrono::{DateTime, Utc};

/// Pricing policy for rentals
#[derive(Debug, Clone, PartialEq)]
pub struct RatePlan {
    /// Flat fee covering the first tier (whole currency units)
    pub base_fee: i64,
    /// Minutes covered by the base fee
    pub base_minutes: i64,
    /// Fee per additional started hour (whole currency units)
    pub hourly_rate: i64,
    /// Currency code (ISO 4217)
    pub currency: String,
}

impl Default for RatePlan {
    fn default() -> Self {
        Self {
            base_fee: 120,
            base_minutes: 60,
            hourly_rate: 50,
            currency: "PHP".to_string(),
        }
    }
}

impl RatePlan {
    /// Fee owed for a rental of the given length.
    ///
    /// Step function over elapsed minutes: `base_fee` up to and including
    /// `base_minutes`, then one `hourly_rate` step per started hour beyond
    /// that. Negative input is treated as zero elapsed time.
    pub fn fee_for_minutes(&self, elapsed_minutes: i64) -> i64 {
        let minutes = elapsed_minutes.max(0);
        if minutes <= self.base_minutes {
            self.base_fee
        } else {
            // Any started hour past the base window bills in full
            let extra_hours = (minutes - self.base_minutes + 59) / 60;
            self.base_fee + extra_hours * self.hourly_rate
        }
    }

    /// Accrued duration and fee for a rental running since `start`.
    ///
    /// Pure with respect to its inputs. If the clock reads earlier than
    /// `start` (skew), the elapsed time is zero, never negative.
    pub fn accrue(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> Accrual {
        let elapsed_seconds = (now - start).num_seconds().max(0);
        let elapsed_minutes = elapsed_seconds / 60;

        Accrual {
            elapsed_seconds,
            elapsed_minutes,
            fee: self.fee_for_minutes(elapsed_minutes),
        }
    }

    /// Format a whole-unit amount as a display string, e.g. `₱120.00`
    pub fn format_amount(&self, amount: i64) -> String {
        match self.currency.as_str() {
            "PHP" => format!("₱{}.00", amount),
            code => format!("{}.00 {}", amount, code),
        }
    }
}

/// Snapshot of duration and fee for a running (or just-ended) rental
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accrual {
    /// Total elapsed seconds, floored at zero
    pub elapsed_seconds: i64,
    /// Authoritative billing quantity
    pub elapsed_minutes: i64,
    /// Fee owed so far (whole currency units)
    pub fee: i64,
}

impl Accrual {
    /// Duration as `Xh Ym`, the form used for rental history
    pub fn format_duration(&self) -> String {
        let hours = self.elapsed_minutes / 60;
        let minutes = self.elapsed_minutes % 60;
        format!("{}h {}m", hours, minutes)
    }

    /// Duration as `Xh Ym Zs`, the form used for the live counter
    pub fn format_duration_with_seconds(&self) -> String {
        let hours = self.elapsed_minutes / 60;
        let minutes = self.elapsed_minutes % 60;
        let seconds = self.elapsed_seconds % 60;
        format!("{}h {}m {}s", hours, minutes, seconds)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn plan() -> RatePlan {
        RatePlan::default()
    }

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn base_fee_covers_first_hour_inclusive() {
        let p = plan();
        for minutes in [0, 1, 30, 59, 60] {
            assert_eq!(p.fee_for_minutes(minutes), 120, "minute {}", minutes);
        }
    }

    #[test]
    fn second_hour_adds_one_step() {
        let p = plan();
        // 61..=120 all bill one extra hour: 120 + 50 = 170
        for minutes in [61, 90, 119, 120] {
            assert_eq!(p.fee_for_minutes(minutes), 170, "minute {}", minutes);
        }
    }

    #[test]
    fn minute_121_starts_third_step() {
        let p = plan();
        assert_eq!(p.fee_for_minutes(121), 220);
    }

    #[test]
    fn fee_is_monotone_nondecreasing() {
        let p = plan();
        let mut last = 0;
        for minutes in 0..=600 {
            let fee = p.fee_for_minutes(minutes);
            assert!(fee >= last, "fee dropped at minute {}", minutes);
            last = fee;
        }
    }

    #[test]
    fn negative_minutes_treated_as_zero() {
        let p = plan();
        assert_eq!(p.fee_for_minutes(-45), 120);
    }

    #[test]
    fn accrue_floors_clock_skew_to_zero() {
        let p = plan();
        let t = start();
        let a = p.accrue(t, t - Duration::minutes(5));
        assert_eq!(a.elapsed_minutes, 0);
        assert_eq!(a.elapsed_seconds, 0);
        assert_eq!(a.fee, 120);
    }

    #[test]
    fn accrue_at_ninety_minutes() {
        let p = plan();
        let t = start();
        let a = p.accrue(t, t + Duration::minutes(90));
        assert_eq!(a.elapsed_minutes, 90);
        assert_eq!(a.fee, 170);
        assert_eq!(a.format_duration(), "1h 30m");
    }

    #[test]
    fn accrue_floors_partial_minutes() {
        let p = plan();
        let t = start();
        // 60m59s is still within the base hour
        let a = p.accrue(t, t + Duration::seconds(60 * 60 + 59));
        assert_eq!(a.elapsed_minutes, 60);
        assert_eq!(a.fee, 120);
    }

    #[test]
    fn live_duration_keeps_seconds() {
        let p = plan();
        let t = start();
        let a = p.accrue(t, t + Duration::seconds(90 * 60 + 15));
        assert_eq!(a.format_duration_with_seconds(), "1h 30m 15s");
    }

    #[test]
    fn format_amount_php() {
        let p = plan();
        assert_eq!(p.format_amount(170), "₱170.00");
    }

    #[test]
    fn format_amount_other_currency() {
        let p = RatePlan {
            currency: "USD".into(),
            ..RatePlan::default()
        };
        assert_eq!(p.format_amount(120), "120.00 USD");
    }
}
