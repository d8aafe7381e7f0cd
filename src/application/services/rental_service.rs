//! Rental lifecycle service
//!
//! The engine behind checkout and return: validates the renter and the
//! bike, claims the bike with a conditional status swap, accrues the
//! tiered fee, and settles payment when the rental closes.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    Accrual, DomainError, DomainResult, EbikeStatus, Payment, RatePlan, Rental,
    RepositoryProvider,
};
use crate::shared::types::clock::{Clock, SystemClock};

/// Service for rental lifecycle operations
pub struct RentalService {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
    rate_plan: RatePlan,
}

impl RentalService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            clock: Arc::new(SystemClock),
            rate_plan: RatePlan::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rate_plan(mut self, rate_plan: RatePlan) -> Self {
        self.rate_plan = rate_plan;
        self
    }

    pub fn rate_plan(&self) -> &RatePlan {
        &self.rate_plan
    }

    /// Check a bike out to a renter.
    ///
    /// The bike is claimed with a conditional `Available` to `In-Use` swap
    /// before the rental record is written, so two concurrent renters
    /// cannot double-book one bike.
    pub async fn start_rental(
        &self,
        ebike_id: &str,
        renter_id: &str,
        station_id: &str,
    ) -> DomainResult<Rental> {
        let renter = self
            .repos
            .renters()
            .find_by_id(renter_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Renter", renter_id))?;

        if !renter.can_rent() {
            return Err(DomainError::Validation(format!(
                "Renter account is {}",
                renter.status
            )));
        }

        if let Some(open) = self.repos.rentals().find_active_for_renter(renter_id).await? {
            return Err(DomainError::Conflict(format!(
                "Renter already has an active rental: {}",
                open.id
            )));
        }

        let ebike = self
            .repos
            .ebikes()
            .find_by_id(ebike_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ebike", ebike_id))?;

        if !ebike.is_available() {
            return Err(DomainError::Validation(format!(
                "Bike {} is not available ({})",
                ebike.display_id(),
                ebike.status
            )));
        }

        let claimed = self
            .repos
            .ebikes()
            .set_status_if(ebike_id, EbikeStatus::Available, EbikeStatus::InUse)
            .await?;
        if !claimed {
            return Err(DomainError::Conflict(format!(
                "Bike {} is no longer available",
                ebike.display_id()
            )));
        }

        let rental = Rental::new(
            Uuid::new_v4().to_string(),
            ebike_id,
            renter_id,
            station_id,
            self.clock.now(),
        );
        let rental = self.repos.rentals().save(rental).await?;

        metrics::counter!("rentals_started_total").increment(1);
        info!(
            rental_id = rental.id.as_str(),
            ebike_id,
            renter_id,
            station_id,
            "🚲 Rental started"
        );

        Ok(rental)
    }

    /// Live (or settled) duration and fee for a rental.
    ///
    /// For a running rental this re-reads the clock and re-runs the pure
    /// accrual; for a settled one it reproduces the frozen figures.
    pub async fn compute_accrual(&self, rental_id: &str) -> DomainResult<(Rental, Accrual)> {
        let rental = self
            .repos
            .rentals()
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", rental_id))?;

        let accrual = match rental.end_time {
            Some(end) => self.rate_plan.accrue(rental.start_time, end),
            None => self.rate_plan.accrue(rental.start_time, self.clock.now()),
        };

        Ok((rental, accrual))
    }

    /// Return a bike: freeze the fee, record the payment, free the bike.
    pub async fn end_rental(&self, rental_id: &str) -> DomainResult<(Rental, Payment)> {
        let rental = self
            .repos
            .rentals()
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", rental_id))?;

        if !rental.is_active() {
            return Err(DomainError::NotActive(rental.id));
        }

        let (rental, payment) = self.settle(rental).await?;

        metrics::counter!("rentals_completed_total").increment(1);
        info!(
            rental_id = rental.id.as_str(),
            ebike_id = rental.ebike_id.as_str(),
            fee = rental.rental_fee,
            "✅ Rental completed"
        );

        Ok((rental, payment))
    }

    /// Operator-forced return, also legal on an overdue rental.
    pub async fn force_end_rental(&self, rental_id: &str) -> DomainResult<(Rental, Payment)> {
        let rental = self
            .repos
            .rentals()
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", rental_id))?;

        if rental.status.is_terminal() {
            return Err(DomainError::NotActive(rental.id));
        }

        let (rental, payment) = self.settle(rental).await?;

        metrics::counter!("rentals_force_ended_total").increment(1);
        info!(
            rental_id = rental.id.as_str(),
            ebike_id = rental.ebike_id.as_str(),
            fee = rental.rental_fee,
            "Rental force-ended by operator"
        );

        Ok((rental, payment))
    }

    /// Shared settlement path. Writes go out payment first, then the
    /// rental, then the bike release; a failure part-way through leaves
    /// the earlier writes in place and surfaces to the caller.
    async fn settle(&self, mut rental: Rental) -> DomainResult<(Rental, Payment)> {
        let now = self.clock.now();
        let accrual = self.rate_plan.accrue(rental.start_time, now);

        let payment = Payment::settled(
            Uuid::new_v4().to_string(),
            rental.renter_id.clone(),
            rental.id.clone(),
            accrual.fee,
            now,
        );
        let payment = self.repos.payments().save(payment).await?;

        rental.close(now, accrual.fee)?;
        self.repos.rentals().update(rental.clone()).await?;

        let freed = self
            .repos
            .ebikes()
            .set_status_if(&rental.ebike_id, EbikeStatus::InUse, EbikeStatus::Available)
            .await?;
        if !freed {
            // Someone moved the bike out of In-Use mid-rental; leave their
            // status in place and let an operator sort it out.
            warn!(
                rental_id = rental.id.as_str(),
                ebike_id = rental.ebike_id.as_str(),
                "Bike was not In-Use at rental settlement"
            );
        }

        Ok((rental, payment))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ebike, PaymentStatus, RentalStatus, Renter, Station};
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use crate::shared::types::clock::ManualClock;
    use chrono::{DateTime, Duration, Utc};

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    async fn setup() -> (Arc<InMemoryRepositoryProvider>, Arc<ManualClock>, RentalService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let clock = Arc::new(ManualClock::starting_at(t0()));

        repos
            .stations()
            .save(Station::new("st-1", "Central Park Station", 40.785091, -73.968285, 12))
            .await
            .unwrap();
        repos
            .ebikes()
            .save(Ebike::new("bike-1", "st-1", 92))
            .await
            .unwrap();
        repos
            .renters()
            .save(Renter::new("u-1", "Alice", "Johnson", "alice@example.com", "+63 917 555 0101"))
            .await
            .unwrap();

        let service = RentalService::new(repos.clone() as Arc<dyn RepositoryProvider>)
            .with_clock(clock.clone() as Arc<dyn Clock>);
        (repos, clock, service)
    }

    #[tokio::test]
    async fn start_creates_active_rental_and_claims_bike() {
        let (repos, _clock, service) = setup().await;

        let rental = service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        assert_eq!(rental.status, RentalStatus::Active);
        assert_eq!(rental.rental_fee, 0);
        assert_eq!(rental.start_time, t0());
        assert!(rental.end_time.is_none());

        let bike = repos.ebikes().find_by_id("bike-1").await.unwrap().unwrap();
        assert_eq!(bike.status, EbikeStatus::InUse);
    }

    #[tokio::test]
    async fn immediate_end_bills_base_fee_and_frees_bike() {
        let (repos, _clock, service) = setup().await;

        let rental = service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        let (rental, payment) = service.end_rental(&rental.id).await.unwrap();

        assert_eq!(rental.rental_fee, 120);
        assert_eq!(rental.status, RentalStatus::Completed);
        assert_eq!(rental.end_time, Some(t0()));
        assert_eq!(payment.amount, 120);
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.rental_id, rental.id);

        let bike = repos.ebikes().find_by_id("bike-1").await.unwrap().unwrap();
        assert_eq!(bike.status, EbikeStatus::Available);
    }

    #[tokio::test]
    async fn accrual_at_ninety_minutes_reads_one_h_thirty_m() {
        let (_repos, clock, service) = setup().await;

        let rental = service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        clock.advance(Duration::minutes(90));

        let (_, accrual) = service.compute_accrual(&rental.id).await.unwrap();
        assert_eq!(accrual.elapsed_minutes, 90);
        assert_eq!(accrual.fee, 170);
        assert_eq!(accrual.format_duration(), "1h 30m");
    }

    #[tokio::test]
    async fn end_at_125_minutes_bills_third_step() {
        let (repos, clock, service) = setup().await;

        let rental = service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        clock.advance(Duration::minutes(125));

        let (rental, payment) = service.end_rental(&rental.id).await.unwrap();
        assert_eq!(rental.rental_fee, 220);
        assert_eq!(payment.amount, 220);

        let bike = repos.ebikes().find_by_id("bike-1").await.unwrap().unwrap();
        assert_eq!(bike.status, EbikeStatus::Available);
    }

    #[tokio::test]
    async fn clock_skew_never_goes_negative() {
        let (_repos, clock, service) = setup().await;

        let rental = service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        clock.set(t0() - Duration::minutes(5));

        let (_, accrual) = service.compute_accrual(&rental.id).await.unwrap();
        assert_eq!(accrual.elapsed_minutes, 0);
        assert_eq!(accrual.fee, 120);
    }

    #[tokio::test]
    async fn double_end_fails_and_writes_no_second_payment() {
        let (repos, _clock, service) = setup().await;

        let rental = service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        service.end_rental(&rental.id).await.unwrap();

        let err = service.end_rental(&rental.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotActive(_)));

        let payments = repos.payments().find_by_renter("u-1").await.unwrap();
        assert_eq!(payments.len(), 1);
    }

    #[tokio::test]
    async fn settled_rental_accrual_reproduces_frozen_figures() {
        let (_repos, clock, service) = setup().await;

        let rental = service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        clock.advance(Duration::minutes(90));
        service.end_rental(&rental.id).await.unwrap();

        // Clock keeps running but the settled figures do not move
        clock.advance(Duration::minutes(300));
        let (_, accrual) = service.compute_accrual(&rental.id).await.unwrap();
        assert_eq!(accrual.elapsed_minutes, 90);
        assert_eq!(accrual.fee, 170);
    }

    #[tokio::test]
    async fn second_active_rental_for_renter_conflicts() {
        let (repos, _clock, service) = setup().await;
        repos
            .ebikes()
            .save(Ebike::new("bike-2", "st-1", 80))
            .await
            .unwrap();

        service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        let err = service.start_rental("bike-2", "u-1", "st-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn unavailable_bike_cannot_be_rented() {
        let (repos, _clock, service) = setup().await;
        repos
            .renters()
            .save(Renter::new("u-2", "Ben", "Reyes", "ben@example.com", "+63 917 555 0102"))
            .await
            .unwrap();

        service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        let err = service.start_rental("bike-1", "u-2", "st-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn suspended_renter_cannot_start() {
        let (repos, _clock, service) = setup().await;
        let mut renter = repos.renters().find_by_id("u-1").await.unwrap().unwrap();
        renter.suspend().unwrap();
        repos.renters().update(renter).await.unwrap();

        let err = service.start_rental("bike-1", "u-1", "st-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_ids_surface_not_found() {
        let (_repos, _clock, service) = setup().await;

        assert!(matches!(
            service.start_rental("ghost-bike", "u-1", "st-1").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            service.end_rental("ghost-rental").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn force_end_settles_an_overdue_rental() {
        let (repos, clock, service) = setup().await;

        let rental = service.start_rental("bike-1", "u-1", "st-1").await.unwrap();
        clock.advance(Duration::minutes(600));

        let mut stored = repos.rentals().find_by_id(&rental.id).await.unwrap().unwrap();
        stored.mark_overdue().unwrap();
        repos.rentals().update(stored).await.unwrap();

        // The renter-facing end requires an active rental
        assert!(matches!(
            service.end_rental(&rental.id).await.unwrap_err(),
            DomainError::NotActive(_)
        ));

        let (rental, payment) = service.force_end_rental(&rental.id).await.unwrap();
        assert_eq!(rental.status, RentalStatus::Completed);
        assert_eq!(rental.rental_fee, 570); // 120 + 9 extra hours * 50
        assert_eq!(payment.amount, 570);

        let bike = repos.ebikes().find_by_id("bike-1").await.unwrap().unwrap();
        assert_eq!(bike.status, EbikeStatus::Available);
    }
}
