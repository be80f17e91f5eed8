//! Replenishment calculator types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calculator tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplenishmentParams {
    /// Service-level z-score (1.65 ~ 95% one-sided service level).
    pub service_level_z: Decimal,
    /// Shelf life assumed when a product has no future-dated lots, in days.
    pub default_shelf_life_days: i64,
}

impl Default for ReplenishmentParams {
    fn default() -> Self {
        Self {
            service_level_z: Decimal::new(165, 2),
            default_shelf_life_days: 15,
        }
    }
}

/// Replenishment figures for one product, one report invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplenishmentResult {
    /// Product the result describes.
    pub product_id: Uuid,
    /// Mean daily demand over the observed sales span.
    pub demand_mean_daily: Decimal,
    /// Buffer covering demand variability at the target service level.
    pub safety_stock: i64,
    /// Stock level at which replenishment should be triggered. Equal to the
    /// safety stock: no supplier lead time is modeled.
    pub reorder_point: i64,
    /// Maximum allowable stock, bounded by expiration-driven shelf life.
    pub max_stock: i64,
    /// In-window net of movement events. Deliberately distinct from the live
    /// expiry-ledger aggregate used elsewhere in the dashboard.
    pub current_stock: i64,
    /// Suggested order quantity; zero when above the reorder point.
    pub suggested_order_qty: i64,
    /// Days the current stock covers at the mean demand rate.
    pub days_of_supply_remaining: Decimal,
    /// Whether the current stock exceeds the shelf-life-bounded maximum.
    pub is_excess: bool,
}
