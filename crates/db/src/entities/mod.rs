//! `SeaORM` entity definitions.

pub mod manufacturers;
pub mod movement_events;
pub mod pharmacies;
pub mod products;
pub mod sea_orm_active_enums;
pub mod stock_lots;
pub mod suppliers;
pub mod users;
