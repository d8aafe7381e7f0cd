//! SeaORM implementation of RenterRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::renter::{Renter, RenterRepository, RenterStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::renter;
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

pub struct SeaOrmRenterRepository {
    db: DatabaseConnection,
}

impl SeaOrmRenterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: renter::Model) -> Renter {
    Renter {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        phone: m.phone,
        // Unknown statuses read back as suspended so the account cannot rent
        status: RenterStatus::from_str(&m.status).unwrap_or(RenterStatus::Suspended),
        date_joined: m.date_joined,
        updated_at: m.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Persistence(format!("Database error: {}", e))
}

// ── RenterRepository impl ───────────────────────────────────────

#[async_trait]
impl RenterRepository for SeaOrmRenterRepository {
    async fn save(&self, r: Renter) -> DomainResult<Renter> {
        debug!("Saving renter: {}", r.id);
        let model = renter::ActiveModel {
            id: Set(r.id),
            first_name: Set(r.first_name),
            last_name: Set(r.last_name),
            email: Set(r.email),
            phone: Set(r.phone),
            status: Set(r.status.as_str().to_string()),
            date_joined: Set(r.date_joined),
            updated_at: Set(r.updated_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Renter>> {
        let model = renter::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: Renter) -> DomainResult<()> {
        debug!("Updating renter: {}", r.id);

        let existing = renter::Entity::find_by_id(&r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Renter", &r.id));
        };

        let model = renter::ActiveModel {
            id: Set(r.id),
            first_name: Set(r.first_name),
            last_name: Set(r.last_name),
            email: Set(r.email),
            phone: Set(r.phone),
            status: Set(r.status.as_str().to_string()),
            date_joined: Set(existing.date_joined),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Renter>> {
        let models = renter::Entity::find()
            .order_by_desc(renter::Column::DateJoined)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_page(&self, params: PaginationParams) -> DomainResult<PaginatedResult<Renter>> {
        let paginator = renter::Entity::find()
            .order_by_desc(renter::Column::DateJoined)
            .paginate(&self.db, params.limit as u64);
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
