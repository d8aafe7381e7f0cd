//! In-memory repository provider
//!
//! Document-store semantics over `DashMap`, used for development and
//! tests. Per-entry locking gives the same single-winner guarantee for
//! conditional status swaps as the SQL backend's guarded update.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::ebike::{Ebike, EbikeRepository, EbikeStatus};
use crate::domain::notification::{NotificationSetting, NotificationSettingRepository};
use crate::domain::payment::{Payment, PaymentRepository};
use crate::domain::rental::{Rental, RentalRepository, RentalStatus};
use crate::domain::renter::{Renter, RenterRepository};
use crate::domain::station::{Station, StationRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    stations: DashMap<String, Station>,
    ebikes: DashMap<String, Ebike>,
    renters: DashMap<String, Renter>,
    rentals: DashMap<String, Rental>,
    payments: DashMap<String, Payment>,
    notification_settings: DashMap<String, NotificationSetting>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            stations: DashMap::new(),
            ebikes: DashMap::new(),
            renters: DashMap::new(),
            rentals: DashMap::new(),
            payments: DashMap::new(),
            notification_settings: DashMap::new(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn page_of<T: Clone>(mut items: Vec<T>, params: PaginationParams) -> PaginatedResult<T> {
    let total = items.len() as u64;
    let start = (params.offset() as usize).min(items.len());
    items.drain(..start);
    items.truncate(params.limit as usize);
    PaginatedResult::new(items, total, params.page, params.limit)
}

// ── StationRepository ───────────────────────────────────────────

#[async_trait]
impl StationRepository for InMemoryRepositoryProvider {
    async fn save(&self, station: Station) -> DomainResult<Station> {
        if self.stations.contains_key(&station.id) {
            return Err(DomainError::Conflict(format!(
                "Station {} already exists",
                station.id
            )));
        }
        self.stations.insert(station.id.clone(), station.clone());
        Ok(station)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Station>> {
        Ok(self.stations.get(id).map(|s| s.clone()))
    }

    async fn update(&self, station: Station) -> DomainResult<()> {
        if !self.stations.contains_key(&station.id) {
            return Err(DomainError::not_found("Station", &station.id));
        }
        self.stations.insert(station.id.clone(), station);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Station>> {
        let mut items: Vec<_> = self.stations.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.stations
            .remove(id)
            .ok_or_else(|| DomainError::not_found("Station", id))?;
        Ok(())
    }
}

// ── EbikeRepository ─────────────────────────────────────────────

#[async_trait]
impl EbikeRepository for InMemoryRepositoryProvider {
    async fn save(&self, ebike: Ebike) -> DomainResult<Ebike> {
        if self.ebikes.contains_key(&ebike.id) {
            return Err(DomainError::Conflict(format!(
                "Ebike {} already exists",
                ebike.id
            )));
        }
        self.ebikes.insert(ebike.id.clone(), ebike.clone());
        Ok(ebike)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Ebike>> {
        Ok(self.ebikes.get(id).map(|b| b.clone()))
    }

    async fn update(&self, ebike: Ebike) -> DomainResult<()> {
        if !self.ebikes.contains_key(&ebike.id) {
            return Err(DomainError::not_found("Ebike", &ebike.id));
        }
        self.ebikes.insert(ebike.id.clone(), ebike);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Ebike>> {
        let mut items: Vec<_> = self.ebikes.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn find_page(
        &self,
        params: PaginationParams,
        station_id: Option<&str>,
        status: Option<EbikeStatus>,
    ) -> DomainResult<PaginatedResult<Ebike>> {
        let mut items: Vec<_> = self.ebikes.iter().map(|e| e.value().clone()).collect();
        if let Some(station_id) = station_id {
            items.retain(|b| b.station_id == station_id);
        }
        if let Some(status) = status {
            items.retain(|b| b.status == status);
        }
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(page_of(items, params))
    }

    async fn find_by_station(&self, station_id: &str) -> DomainResult<Vec<Ebike>> {
        let mut items: Vec<_> = self
            .ebikes
            .iter()
            .filter(|e| e.value().station_id == station_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn find_available(&self) -> DomainResult<Vec<Ebike>> {
        let mut items: Vec<_> = self
            .ebikes
            .iter()
            .filter(|e| e.value().is_available())
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn set_status_if(
        &self,
        id: &str,
        from: EbikeStatus,
        to: EbikeStatus,
    ) -> DomainResult<bool> {
        // The map entry stays locked for the whole check-and-set
        match self.ebikes.get_mut(id) {
            Some(mut bike) if bike.status == from => {
                bike.set_status(to);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.ebikes
            .remove(id)
            .ok_or_else(|| DomainError::not_found("Ebike", id))?;
        Ok(())
    }
}

// ── RenterRepository ────────────────────────────────────────────

#[async_trait]
impl RenterRepository for InMemoryRepositoryProvider {
    async fn save(&self, renter: Renter) -> DomainResult<Renter> {
        if self.renters.contains_key(&renter.id) {
            return Err(DomainError::Conflict(format!(
                "Renter {} already exists",
                renter.id
            )));
        }
        self.renters.insert(renter.id.clone(), renter.clone());
        Ok(renter)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Renter>> {
        Ok(self.renters.get(id).map(|r| r.clone()))
    }

    async fn update(&self, renter: Renter) -> DomainResult<()> {
        if !self.renters.contains_key(&renter.id) {
            return Err(DomainError::not_found("Renter", &renter.id));
        }
        self.renters.insert(renter.id.clone(), renter);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Renter>> {
        let mut items: Vec<_> = self.renters.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| b.date_joined.cmp(&a.date_joined));
        Ok(items)
    }

    async fn find_page(&self, params: PaginationParams) -> DomainResult<PaginatedResult<Renter>> {
        let mut items: Vec<_> = self.renters.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| b.date_joined.cmp(&a.date_joined));
        Ok(page_of(items, params))
    }
}

// ── RentalRepository ────────────────────────────────────────────

#[async_trait]
impl RentalRepository for InMemoryRepositoryProvider {
    async fn save(&self, rental: Rental) -> DomainResult<Rental> {
        if self.rentals.contains_key(&rental.id) {
            return Err(DomainError::Conflict(format!(
                "Rental {} already exists",
                rental.id
            )));
        }
        self.rentals.insert(rental.id.clone(), rental.clone());
        Ok(rental)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Rental>> {
        Ok(self.rentals.get(id).map(|r| r.clone()))
    }

    async fn update(&self, rental: Rental) -> DomainResult<()> {
        if !self.rentals.contains_key(&rental.id) {
            return Err(DomainError::not_found("Rental", &rental.id));
        }
        self.rentals.insert(rental.id.clone(), rental);
        Ok(())
    }

    async fn find_active_for_renter(&self, renter_id: &str) -> DomainResult<Option<Rental>> {
        Ok(self
            .rentals
            .iter()
            .find(|e| {
                let r = e.value();
                r.renter_id == renter_id && !r.status.is_terminal()
            })
            .map(|e| e.value().clone()))
    }

    async fn find_by_status(&self, status: RentalStatus) -> DomainResult<Vec<Rental>> {
        let mut items: Vec<_> = self
            .rentals
            .iter()
            .filter(|e| e.value().status == status)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(items)
    }

    async fn find_by_renter(&self, renter_id: &str) -> DomainResult<Vec<Rental>> {
        let mut items: Vec<_> = self
            .rentals
            .iter()
            .filter(|e| e.value().renter_id == renter_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(items)
    }

    async fn find_all(&self) -> DomainResult<Vec<Rental>> {
        let mut items: Vec<_> = self.rentals.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(items)
    }

    async fn find_page(
        &self,
        params: PaginationParams,
        status: Option<RentalStatus>,
    ) -> DomainResult<PaginatedResult<Rental>> {
        let mut items: Vec<_> = self.rentals.iter().map(|e| e.value().clone()).collect();
        if let Some(status) = status {
            items.retain(|r| r.status == status);
        }
        items.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(page_of(items, params))
    }
}

// ── PaymentRepository ───────────────────────────────────────────

#[async_trait]
impl PaymentRepository for InMemoryRepositoryProvider {
    async fn save(&self, payment: Payment) -> DomainResult<Payment> {
        if self.payments.contains_key(&payment.id) {
            return Err(DomainError::Conflict(format!(
                "Payment {} already exists",
                payment.id
            )));
        }
        self.payments.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Payment>> {
        Ok(self.payments.get(id).map(|p| p.clone()))
    }

    async fn find_by_rental(&self, rental_id: &str) -> DomainResult<Option<Payment>> {
        Ok(self
            .payments
            .iter()
            .find(|e| e.value().rental_id == rental_id)
            .map(|e| e.value().clone()))
    }

    async fn find_by_renter(&self, renter_id: &str) -> DomainResult<Vec<Payment>> {
        let mut items: Vec<_> = self
            .payments
            .iter()
            .filter(|e| e.value().renter_id == renter_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(items)
    }

    async fn find_page(&self, params: PaginationParams) -> DomainResult<PaginatedResult<Payment>> {
        let mut items: Vec<_> = self.payments.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(page_of(items, params))
    }
}

// ── NotificationSettingRepository ───────────────────────────────

#[async_trait]
impl NotificationSettingRepository for InMemoryRepositoryProvider {
    async fn save(&self, setting: NotificationSetting) -> DomainResult<NotificationSetting> {
        self.notification_settings
            .insert(setting.id.clone(), setting.clone());
        Ok(setting)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<NotificationSetting>> {
        Ok(self.notification_settings.get(id).map(|s| s.clone()))
    }

    async fn update(&self, setting: NotificationSetting) -> DomainResult<()> {
        if !self.notification_settings.contains_key(&setting.id) {
            return Err(DomainError::not_found("NotificationSetting", &setting.id));
        }
        self.notification_settings
            .insert(setting.id.clone(), setting);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<NotificationSetting>> {
        let mut items: Vec<_> = self
            .notification_settings
            .iter()
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(items)
    }
}

// ── RepositoryProvider ──────────────────────────────────────────

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn stations(&self) -> &dyn StationRepository {
        self
    }

    fn ebikes(&self) -> &dyn EbikeRepository {
        self
    }

    fn renters(&self) -> &dyn RenterRepository {
        self
    }

    fn rentals(&self) -> &dyn RentalRepository {
        self
    }

    fn payments(&self) -> &dyn PaymentRepository {
        self
    }

    fn notification_settings(&self) -> &dyn NotificationSettingRepository {
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn conditional_swap_has_a_single_winner() {
        let repos = InMemoryRepositoryProvider::new();
        repos
            .ebikes()
            .save(Ebike::new("b-1", "st-1", 90))
            .await
            .unwrap();

        let first = repos
            .ebikes()
            .set_status_if("b-1", EbikeStatus::Available, EbikeStatus::InUse)
            .await
            .unwrap();
        let second = repos
            .ebikes()
            .set_status_if("b-1", EbikeStatus::Available, EbikeStatus::InUse)
            .await
            .unwrap();

        assert!(first);
        assert!(!second);

        let bike = repos.ebikes().find_by_id("b-1").await.unwrap().unwrap();
        assert_eq!(bike.status, EbikeStatus::InUse);
    }

    #[tokio::test]
    async fn swap_on_missing_bike_is_lost_not_an_error() {
        let repos = InMemoryRepositoryProvider::new();
        let won = repos
            .ebikes()
            .set_status_if("ghost", EbikeStatus::Available, EbikeStatus::InUse)
            .await
            .unwrap();
        assert!(!won);
    }

    #[tokio::test]
    async fn duplicate_save_conflicts() {
        let repos = InMemoryRepositoryProvider::new();
        repos
            .stations()
            .save(Station::new("st-1", "Central Park", 40.782, -73.965, 10))
            .await
            .unwrap();

        let err = repos
            .stations()
            .save(Station::new("st-1", "Central Park", 40.782, -73.965, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn rental_pages_are_newest_first() {
        use chrono::{Duration, Utc};

        let repos = InMemoryRepositoryProvider::new();
        let base = Utc::now();
        for i in 0..5 {
            let mut rental = Rental::new(
                format!("r-{}", i),
                "b-1",
                format!("u-{}", i),
                "st-1",
                base + Duration::minutes(i),
            );
            rental.close(base + Duration::minutes(i + 1), 120).unwrap();
            repos.rentals().save(rental).await.unwrap();
        }

        let page = repos
            .rentals()
            .find_page(PaginationParams::new(1, 2), None)
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].id, "r-4");
        assert_eq!(page.items[1].id, "r-3");
    }
}
