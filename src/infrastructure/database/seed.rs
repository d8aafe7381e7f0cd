//! Initial data seeding

use tracing::info;

use crate::domain::{
    DomainResult, Ebike, EbikeStatus, NotificationSetting, Renter, RepositoryProvider, Station,
};

/// Ensure every notification setting exists. Runs on every startup;
/// existing rows keep whatever the operator saved.
pub async fn seed_notification_defaults(repos: &dyn RepositoryProvider) -> DomainResult<()> {
    let mut created = 0;
    for setting in NotificationSetting::defaults() {
        if repos
            .notification_settings()
            .find_by_id(&setting.id)
            .await?
            .is_none()
        {
            repos.notification_settings().save(setting).await?;
            created += 1;
        }
    }

    if created > 0 {
        info!(created, "Seeded notification settings");
    }
    Ok(())
}

/// Populate a small demo fleet for local development. Skipped entirely
/// once any station exists.
pub async fn seed_demo_fleet(repos: &dyn RepositoryProvider) -> DomainResult<()> {
    if !repos.stations().find_all().await?.is_empty() {
        return Ok(());
    }

    let stations = [
        Station::new("STN001", "Central Park", 40.782, -73.965, 10),
        Station::new("STN002", "Downtown Plaza", 34.052, -118.243, 15),
        Station::new("STN003", "Riverside Bike Hub", 41.878, -87.629, 12),
        Station::new("STN004", "Ocean View Pier", 33.985, -118.471, 8),
    ];
    for station in stations {
        repos.stations().save(station).await?;
    }

    let bikes = [
        ("EBK001", "STN001", 85, EbikeStatus::Available),
        ("EBK002", "STN001", 62, EbikeStatus::Available),
        ("EBK003", "STN002", 95, EbikeStatus::Available),
        ("EBK004", "STN002", 30, EbikeStatus::Locked),
        ("EBK005", "STN003", 75, EbikeStatus::Maintenance),
        ("EBK006", "STN003", 100, EbikeStatus::Available),
        ("EBK007", "STN001", 45, EbikeStatus::Available),
    ];
    for (id, station_id, battery, status) in bikes {
        let mut bike = Ebike::new(id, station_id, battery);
        bike.set_status(status);
        repos.ebikes().save(bike).await?;
    }

    let renters = [
        ("USR001", "Alice", "Johnson", "alice@example.com", "+63 917 555 0101", false),
        ("USR002", "Bob", "Williams", "bob@example.com", "+63 917 555 0102", false),
        ("USR003", "Charlie", "Brown", "charlie@example.com", "+63 917 555 0103", true),
        ("USR004", "Diana", "Miller", "diana@example.com", "+63 917 555 0104", false),
    ];
    for (id, first, last, email, phone, suspended) in renters {
        let mut renter = Renter::new(id, first, last, email, phone);
        if suspended {
            renter.suspend()?;
        }
        repos.renters().save(renter).await?;
    }

    info!("🌱 Seeded demo fleet: 4 stations, 7 bikes, 4 renters");
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;

    #[tokio::test]
    async fn notification_defaults_are_idempotent() {
        let repos = InMemoryRepositoryProvider::new();

        seed_notification_defaults(&repos).await.unwrap();
        let first = repos.notification_settings().find_all().await.unwrap();
        assert_eq!(first.len(), 3);

        // Flip one, reseed, the edit survives
        let mut setting = repos
            .notification_settings()
            .find_by_id("lock-warnings")
            .await
            .unwrap()
            .unwrap();
        setting.set_active(true);
        repos.notification_settings().update(setting).await.unwrap();

        seed_notification_defaults(&repos).await.unwrap();
        let after = repos
            .notification_settings()
            .find_by_id("lock-warnings")
            .await
            .unwrap()
            .unwrap();
        assert!(after.active);
    }

    #[tokio::test]
    async fn demo_fleet_seeds_once() {
        let repos = InMemoryRepositoryProvider::new();

        seed_demo_fleet(&repos).await.unwrap();
        assert_eq!(repos.stations().find_all().await.unwrap().len(), 4);
        assert_eq!(repos.ebikes().find_all().await.unwrap().len(), 7);
        assert_eq!(repos.renters().find_all().await.unwrap().len(), 4);

        seed_demo_fleet(&repos).await.unwrap();
        assert_eq!(repos.stations().find_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn seeded_locked_bike_has_lock_flag() {
        let repos = InMemoryRepositoryProvider::new();
        seed_demo_fleet(&repos).await.unwrap();

        let bike = repos.ebikes().find_by_id("EBK004").await.unwrap().unwrap();
        assert_eq!(bike.status, EbikeStatus::Locked);
        assert!(bike.locked);
    }
}
