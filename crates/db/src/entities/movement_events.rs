//! `SeaORM` Entity for the movement_events table (append-only ledger).
//!
//! `product_id` is deliberately not a foreign key: movement history must
//! survive product deletion so reports can show a placeholder instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MovementKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "movement_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pharmacy_id: Uuid,
    pub product_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i64,
    pub signed_effect: i64,
    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pharmacies::Entity",
        from = "Column::PharmacyId",
        to = "super::pharmacies::Column::Id"
    )]
    Pharmacies,
}

impl Related<super::pharmacies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pharmacies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts the row into the core movement event consumed by the demand
    /// estimator and replenishment calculator.
    #[must_use]
    pub fn to_core_event(&self) -> stockfarm_core::movement::MovementEvent {
        stockfarm_core::movement::MovementEvent {
            product_id: self.product_id,
            kind: self.kind.clone().into(),
            quantity: self.quantity,
            signed_effect: self.signed_effect,
            timestamp: self.timestamp.to_utc(),
        }
    }
}
