//! SeaORM implementation of RentalRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::rental::{Rental, RentalRepository, RentalStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::rental;
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

pub struct SeaOrmRentalRepository {
    db: DatabaseConnection,
}

impl SeaOrmRentalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: rental::Model) -> Rental {
    Rental {
        id: m.id,
        ebike_id: m.ebike_id,
        renter_id: m.renter_id,
        station_id: m.station_id,
        start_time: m.start_time,
        end_time: m.end_time,
        rental_fee: m.rental_fee,
        // Unknown statuses read back as completed so they cannot settle twice
        status: RentalStatus::from_str(&m.status).unwrap_or(RentalStatus::Completed),
    }
}

fn domain_to_active(r: Rental) -> rental::ActiveModel {
    rental::ActiveModel {
        id: Set(r.id),
        ebike_id: Set(r.ebike_id),
        renter_id: Set(r.renter_id),
        station_id: Set(r.station_id),
        start_time: Set(r.start_time),
        end_time: Set(r.end_time),
        rental_fee: Set(r.rental_fee),
        status: Set(r.status.as_str().to_string()),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Persistence(format!("Database error: {}", e))
}

// ── RentalRepository impl ───────────────────────────────────────

#[async_trait]
impl RentalRepository for SeaOrmRentalRepository {
    async fn save(&self, r: Rental) -> DomainResult<Rental> {
        debug!("Saving rental: {}", r.id);
        let result = domain_to_active(r).insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Rental>> {
        let model = rental::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: Rental) -> DomainResult<()> {
        debug!("Updating rental: {}", r.id);

        let existing = rental::Entity::find_by_id(&r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("Rental", &r.id));
        }

        domain_to_active(r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_active_for_renter(&self, renter_id: &str) -> DomainResult<Option<Rental>> {
        let model = rental::Entity::find()
            .filter(rental::Column::RenterId.eq(renter_id))
            .filter(rental::Column::Status.is_in([
                RentalStatus::Active.as_str(),
                RentalStatus::Overdue.as_str(),
            ]))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_status(&self, status: RentalStatus) -> DomainResult<Vec<Rental>> {
        let models = rental::Entity::find()
            .filter(rental::Column::Status.eq(status.as_str()))
            .order_by_desc(rental::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_renter(&self, renter_id: &str) -> DomainResult<Vec<Rental>> {
        let models = rental::Entity::find()
            .filter(rental::Column::RenterId.eq(renter_id))
            .order_by_desc(rental::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Rental>> {
        let models = rental::Entity::find()
            .order_by_desc(rental::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_page(
        &self,
        params: PaginationParams,
        status: Option<RentalStatus>,
    ) -> DomainResult<PaginatedResult<Rental>> {
        let mut query = rental::Entity::find().order_by_desc(rental::Column::StartTime);
        if let Some(status) = status {
            query = query.filter(rental::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(&self.db, params.limit as u64);
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page((params.page - 1) as u64)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
            params.page,
            params.limit,
        ))
    }
}
