//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::payment::{Payment, PaymentRepository, PaymentStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment;
use crate::shared::types::pagination::{PaginatedResult, PaginationParams};

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: payment::Model) -> Payment {
    Payment {
        id: m.id,
        renter_id: m.renter_id,
        rental_id: m.rental_id,
        amount: m.amount,
        status: PaymentStatus::from_str(&m.status).unwrap_or(PaymentStatus::Pending),
        payment_date: m.payment_date,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Persistence(format!("Database error: {}", e))
}

// ── PaymentRepository impl ──────────────────────────────────────

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn save(&self, p: Payment) -> DomainResult<Payment> {
        debug!("Saving payment: {} for rental {}", p.id, p.rental_id);
        let model = payment::ActiveModel {
            id: Set(p.id),
            renter_id: Set(p.renter_id),
            rental_id: Set(p.rental_id),
            amount: Set(p.amount),
            status: Set(p.status.as_str().to_string()),
            payment_date: Set(p.payment_date),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_rental(&self, rental_id: &str) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find()
            .filter(payment::Column::RentalId.eq(rental_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_renter(&self, renter_id: &str) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::RenterId.eq(renter_id))
            .order_by_desc(payment::Column::PaymentDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_page(&self, params: PaginationParams) -> DomainResult<PaginatedResult<Payment>> {
        let paginator = payment::Entity::find()
            .order_by_desc(payment::Column::PaymentDate)
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
