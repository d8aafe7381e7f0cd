//! Station entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(column_type = "Double")]
    pub latitude: f64,

    #[sea_orm(column_type = "Double")]
    pub longitude: f64,

    pub parking_bays: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ebike::Entity")]
    Ebike,
}

impl Related<super::ebike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ebike.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
