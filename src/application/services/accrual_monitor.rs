//! Background accrual monitor
//!
//! Periodically recomputes the live fee for every open rental and keeps
//! the results in a shared snapshot map, so dashboard reads do not have
//! to touch the store on every request.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};

use crate::domain::{Accrual, DomainResult, RatePlan, RentalStatus, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;
use crate::shared::types::clock::{Clock, SystemClock};

/// Configuration for the accrual monitor
#[derive(Debug, Clone)]
pub struct AccrualMonitorConfig {
    /// How often to refresh the snapshots (seconds)
    pub refresh_interval_secs: u64,
}

impl Default for AccrualMonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 60,
        }
    }
}

/// Recomputes open-rental fees on a timer and serves them from memory
pub struct AccrualMonitor {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
    rate_plan: RatePlan,
    config: AccrualMonitorConfig,
    snapshots: Arc<DashMap<String, Accrual>>,
}

impl AccrualMonitor {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            clock: Arc::new(SystemClock),
            rate_plan: RatePlan::default(),
            config: AccrualMonitorConfig::default(),
            snapshots: Arc::new(DashMap::new()),
        }
    }

    pub fn with_config(mut self, config: AccrualMonitorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rate_plan(mut self, rate_plan: RatePlan) -> Self {
        self.rate_plan = rate_plan;
        self
    }

    /// Every tracked rental with its last refreshed accrual, sorted by
    /// rental id for stable output.
    pub fn snapshot_all(&self) -> Vec<(String, Accrual)> {
        let mut entries: Vec<_> = self
            .snapshots
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Run one refresh pass immediately, outside the timer loop.
    pub async fn refresh_now(&self) -> DomainResult<usize> {
        refresh_accruals(&*self.repos, &*self.clock, &self.rate_plan, &self.snapshots).await
    }

    /// Start the refresh loop. Runs until shutdown is signalled.
    pub fn start(&self, shutdown: ShutdownSignal) -> tokio::task::JoinHandle<()> {
        let repos = self.repos.clone();
        let clock = self.clock.clone();
        let rate_plan = self.rate_plan.clone();
        let snapshots = self.snapshots.clone();
        let refresh_secs = self.config.refresh_interval_secs;

        info!(
            refresh_interval_secs = refresh_secs,
            "📊 Starting accrual monitor"
        );

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(refresh_secs));

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match refresh_accruals(&*repos, &*clock, &rate_plan, &snapshots).await {
                            Ok(count) => {
                                debug!(open_rentals = count, "Accrual snapshots refreshed");
                            }
                            Err(e) => {
                                error!("Accrual refresh failed: {}", e);
                            }
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!("📊 Accrual monitor shutting down");
                        break;
                    }
                }
            }
        })
    }
}

/// One refresh pass: recompute every open rental, drop settled ones.
async fn refresh_accruals(
    repos: &dyn RepositoryProvider,
    clock: &dyn Clock,
    rate_plan: &RatePlan,
    snapshots: &DashMap<String, Accrual>,
) -> DomainResult<usize> {
    let mut open = repos.rentals().find_by_status(RentalStatus::Active).await?;
    open.extend(
        repos
            .rentals()
            .find_by_status(RentalStatus::Overdue)
            .await?,
    );

    let now = clock.now();
    for rental in &open {
        snapshots.insert(rental.id.clone(), rate_plan.accrue(rental.start_time, now));
    }

    snapshots.retain(|id, _| open.iter().any(|r| &r.id == id));

    Ok(open.len())
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
    async fn refresh_tracks_open_rentals_and_drops_settled_ones() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let clock = ManualClock::starting_at(t0() + ChronoDuration::minutes(90));
        let rate_plan = RatePlan::default();
        let snapshots = DashMap::new();

        let rental = Rental::new("r-1", "bike-1", "u-1", "st-1", t0());
        repos.rentals().save(rental.clone()).await.unwrap();

        let count = refresh_accruals(&*repos, &clock, &rate_plan, &snapshots)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let snap = snapshots.get("r-1").unwrap();
        assert_eq!(snap.elapsed_minutes, 90);
        assert_eq!(snap.fee, 170);
        drop(snap);

        // Settle the rental; the next pass forgets it
        let mut stored = repos.rentals().find_by_id("r-1").await.unwrap().unwrap();
        stored
            .close(t0() + ChronoDuration::minutes(95), 170)
            .unwrap();
        repos.rentals().update(stored).await.unwrap();

        let count = refresh_accruals(&*repos, &clock, &rate_plan, &snapshots)
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert!(snapshots.get("r-1").is_none());
    }

    #[tokio::test]
    async fn snapshot_all_serves_the_refreshed_accruals() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let clock = Arc::new(ManualClock::starting_at(t0() + ChronoDuration::minutes(30)));

        repos
            .rentals()
            .save(Rental::new("r-b", "bike-2", "u-2", "st-1", t0()))
            .await
            .unwrap();
        repos
            .rentals()
            .save(Rental::new("r-a", "bike-1", "u-1", "st-1", t0()))
            .await
            .unwrap();

        let monitor = AccrualMonitor::new(repos).with_clock(clock);
        assert!(monitor.snapshot_all().is_empty());

        let count = monitor.refresh_now().await.unwrap();
        assert_eq!(count, 2);

        let entries = monitor.snapshot_all();
        assert_eq!(entries.len(), 2);
        // Sorted by rental id
        assert_eq!(entries[0].0, "r-a");
        assert_eq!(entries[1].0, "r-b");
        assert_eq!(entries[0].1.elapsed_minutes, 30);
        assert_eq!(entries[0].1.fee, 120);
    }

    #[tokio::test]
    async fn overdue_rentals_keep_accruing() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let clock = ManualClock::starting_at(t0() + ChronoDuration::minutes(300));
        let rate_plan = RatePlan::default();
        let snapshots = DashMap::new();

        let mut rental = Rental::new("r-2", "bike-1", "u-1", "st-1", t0());
        rental.mark_overdue().unwrap();
        repos.rentals().save(rental).await.unwrap();

        refresh_accruals(&*repos, &clock, &rate_plan, &snapshots)
            .await
            .unwrap();

        let snap = snapshots.get("r-2").unwrap();
        assert_eq!(snap.elapsed_minutes, 300);
        assert_eq!(snap.fee, 120 + 4 * 50);
    }
}
