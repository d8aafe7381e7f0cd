//! SeaORM implementation of EbikeRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::ebike::{Ebike, EbikeRepository, EbikeStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::ebike;
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

pub struct SeaOrmEbikeRepository {
    db: DatabaseConnection,
}

impl SeaOrmEbikeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: ebike::Model) -> Ebike {
    Ebike {
        id: m.id,
        station_id: m.station_id,
        battery_level: m.battery_level,
        status: EbikeStatus::from(m.status.as_str()),
        locked: m.locked,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Persistence(format!("Database error: {}", e))
}

// ── EbikeRepository impl ────────────────────────────────────────

#[async_trait]
impl EbikeRepository for SeaOrmEbikeRepository {
    async fn save(&self, b: Ebike) -> DomainResult<Ebike> {
        debug!("Saving ebike: {}", b.id);
        let model = ebike::ActiveModel {
            id: Set(b.id),
            station_id: Set(b.station_id),
            battery_level: Set(b.battery_level),
            status: Set(b.status.as_str().to_string()),
            locked: Set(b.locked),
            created_at: Set(b.created_at),
            updated_at: Set(b.updated_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Ebike>> {
        let model = ebike::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, b: Ebike) -> DomainResult<()> {
        debug!("Updating ebike: {}", b.id);

        let existing = ebike::Entity::find_by_id(&b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Ebike", &b.id));
        };

        let model = ebike::ActiveModel {
            id: Set(b.id),
            station_id: Set(b.station_id),
            battery_level: Set(b.battery_level),
            status: Set(b.status.as_str().to_string()),
            locked: Set(b.locked),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Ebike>> {
        let models = ebike::Entity::find()
            .order_by_asc(ebike::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_page(
        &self,
        params: PaginationParams,
        station_id: Option<&str>,
        status: Option<EbikeStatus>,
    ) -> DomainResult<PaginatedResult<Ebike>> {
        let mut query = ebike::Entity::find().order_by_asc(ebike::Column::Id);
        if let Some(station_id) = station_id {
            query = query.filter(ebike::Column::StationId.eq(station_id));
        }
        if let Some(status) = status {
            query = query.filter(ebike::Column::Status.eq(status.as_str()));
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

    async fn find_by_station(&self, station_id: &str) -> DomainResult<Vec<Ebike>> {
        let models = ebike::Entity::find()
            .filter(ebike::Column::StationId.eq(station_id))
            .order_by_asc(ebike::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_available(&self) -> DomainResult<Vec<Ebike>> {
        let models = ebike::Entity::find()
            .filter(ebike::Column::Status.eq(EbikeStatus::Available.as_str()))
            .order_by_asc(ebike::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn set_status_if(
        &self,
        id: &str,
        from: EbikeStatus,
        to: EbikeStatus,
    ) -> DomainResult<bool> {
        // Guarded update: only flips rows still in `from`, so concurrent
        // claims on the same bike resolve to a single winner.
        let result = ebike::Entity::update_many()
            .col_expr(ebike::Column::Status, Expr::value(to.as_str()))
            .col_expr(ebike::Column::Locked, Expr::value(to == EbikeStatus::Locked))
            .col_expr(ebike::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(ebike::Column::Id.eq(id))
            .filter(ebike::Column::Status.eq(from.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        debug!(
            "Conditional status swap for {}: {} -> {} ({} rows)",
            id, from, to, result.rows_affected
        );
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = ebike::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Ebike", id));
        }
        Ok(())
    }
}
