//! Overdue rental watch
//!
//! Flags rentals that have run past the configured maximum duration so
//! operators can step in. Flagged rentals keep accruing until an admin
//! force-ends them.

use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{debug, error, info, warn};

use crate::domain::{DomainResult, RentalStatus, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;
use crate::shared::types::clock::Clock;

/// Spawn the watch loop. Only started when a maximum rental duration is
/// configured.
pub fn start_overdue_watch(
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
    max_rental_minutes: i64,
) -> tokio::task::JoinHandle<()> {
    info!(
        check_interval_secs,
        max_rental_minutes, "📅 Starting overdue rental watch"
    );

    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match flag_overdue_rentals(&*repos, &*clock, max_rental_minutes).await {
                        Ok(0) => {
                            debug!("No rentals past the duration limit");
                        }
                        Ok(flagged) => {
                            info!(flagged, "Rentals flagged overdue");
                        }
                        Err(e) => {
                            error!("Overdue check failed: {}", e);
                        }
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("📅 Overdue rental watch shutting down");
                    break;
                }
            }
        }
    })
}

/// One pass: flag every active rental older than the limit.
async fn flag_overdue_rentals(
    repos: &dyn RepositoryProvider,
    clock: &dyn Clock,
    max_rental_minutes: i64,
) -> DomainResult<usize> {
    let active = repos.rentals().find_by_status(RentalStatus::Active).await?;
    let now = clock.now();

    let mut flagged = 0;
    for mut rental in active {
        let elapsed_minutes = (now - rental.start_time).num_seconds().max(0) / 60;
        if elapsed_minutes <= max_rental_minutes {
            continue;
        }

        if let Err(e) = rental.mark_overdue() {
            warn!(rental_id = rental.id.as_str(), "Could not flag rental: {}", e);
            continue;
        }

        let rental_id = rental.id.clone();
        repos.rentals().update(rental).await?;
        metrics::counter!("rentals_overdue_total").increment(1);
        warn!(
            rental_id = rental_id.as_str(),
            elapsed_minutes, max_rental_minutes, "⏰ Rental is overdue"
        );
        flagged += 1;
    }

    Ok(flagged)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rental, RentalRepository};
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use crate::shared::types::clock::ManualClock;
    use chrono::{DateTime, Duration as ChronoDuration, Utc};

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn flags_only_rentals_past_the_limit() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let clock = ManualClock::starting_at(t0() + ChronoDuration::minutes(500));

        repos
            .rentals()
            .save(Rental::new("r-old", "bike-1", "u-1", "st-1", t0()))
            .await
            .unwrap();
        repos
            .rentals()
            .save(Rental::new(
                "r-fresh",
                "bike-2",
                "u-2",
                "st-1",
                t0() + ChronoDuration::minutes(450),
            ))
            .await
            .unwrap();

        let flagged = flag_overdue_rentals(&*repos, &clock, 480).await.unwrap();
        assert_eq!(flagged, 1);

        let old = repos.rentals().find_by_id("r-old").await.unwrap().unwrap();
        assert_eq!(old.status, RentalStatus::Overdue);
        let fresh = repos.rentals().find_by_id("r-fresh").await.unwrap().unwrap();
        assert_eq!(fresh.status, RentalStatus::Active);
    }

    #[tokio::test]
    async fn already_flagged_rentals_are_left_alone() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let clock = ManualClock::starting_at(t0() + ChronoDuration::minutes(500));

        let mut rental = Rental::new("r-1", "bike-1", "u-1", "st-1", t0());
        rental.mark_overdue().unwrap();
        repos.rentals().save(rental).await.unwrap();

        let flagged = flag_overdue_rentals(&*repos, &clock, 480).await.unwrap();
        assert_eq!(flagged, 0);
    }

    #[tokio::test]
    async fn boundary_minute_is_not_overdue() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let clock = ManualClock::starting_at(t0() + ChronoDuration::minutes(480));

        repos
            .rentals()
            .save(Rental::new("r-1", "bike-1", "u-1", "st-1", t0()))
            .await
            .unwrap();

        let flagged = flag_overdue_rentals(&*repos, &clock, 480).await.unwrap();
        assert_eq!(flagged, 0);
    }
}
