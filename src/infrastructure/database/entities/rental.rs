//! Rental entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rentals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub ebike_id: String,
    pub renter_id: String,

    /// Pickup station at checkout time
    pub station_id: String,

    pub start_time: DateTimeUtc,

    #[sea_orm(nullable)]
    pub end_time: Option<DateTimeUtc>,

    /// Accrued fee in whole pesos; frozen at settlement
    pub rental_fee: i64,

    /// Lifecycle status: active, completed, overdue
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ebike::Entity",
        from = "Column::EbikeId",
        to = "super::ebike::Column::Id"
    )]
    Ebike,

    #[sea_orm(
        belongs_to = "super::renter::Entity",
        from = "Column::RenterId",
        to = "super::renter::Column::Id"
    )]
    Renter,
}

impl Related<super::ebike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ebike.def()
    }
}

impl Related<super::renter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Renter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
