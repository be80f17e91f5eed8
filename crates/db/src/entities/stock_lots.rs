//! `SeaORM` Entity for the stock_lots table (expiry ledger).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_lots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub expiration_date: Date,
    pub quantity_remaining: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id"
    )]
    Products,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Snapshot view consumed by the pure withdrawal planner.
    #[must_use]
    pub fn to_expiry_lot(&self) -> stockfarm_core::stock::ExpiryLot {
        stockfarm_core::stock::ExpiryLot {
            id: self.id,
            product_id: self.product_id,
            expiration_date: self.expiration_date,
            quantity_remaining: self.quantity_remaining,
        }
    }
}
