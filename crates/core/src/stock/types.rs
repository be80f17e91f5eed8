//! Expiry ledger types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A quantity of one product sharing a single expiration date.
///
/// Lots are never merged: every stock addition creates a distinct lot even
/// when the expiration date matches an existing one. A lot whose
/// `quantity_remaining` reaches zero is eligible for deletion by the owning
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryLot {
    /// Lot identifier. Time-ordered (UUID v7), so it doubles as the FEFO
    /// tie-breaker for lots sharing an expiration date.
    pub id: Uuid,
    /// Product this lot belongs to.
    pub product_id: Uuid,
    /// Expiration date of every unit in the lot.
    pub expiration_date: NaiveDate,
    /// Units left in the lot; invariant: never negative.
    pub quantity_remaining: i64,
}

/// Consumption of a single lot inside a withdrawal plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotDraw {
    /// Lot being drawn from.
    pub lot_id: Uuid,
    /// Units taken from this lot.
    pub consumed: i64,
    /// Units left in the lot after the draw.
    pub remaining_after: i64,
}

/// A fully-resolved FEFO allocation, computed against a snapshot before any
/// write takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalPlan {
    /// Per-lot draws in consumption order (earliest expiration first).
    pub draws: Vec<LotDraw>,
    /// Total units withdrawn; equals the requested quantity.
    pub total: i64,
}

impl WithdrawalPlan {
    /// Lots fully consumed by this plan, eligible for deletion on commit.
    #[must_use]
    pub fn depleted_lot_ids(&self) -> Vec<Uuid> {
        self.draws
            .iter()
            .filter(|d| d.remaining_after == 0)
            .map(|d| d.lot_id)
            .collect()
    }
}

/// Per-product stock summary derived from the lots, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAggregate {
    /// Product the aggregate describes.
    pub product_id: Uuid,
    /// Sum of `quantity_remaining` across non-empty lots.
    pub total_quantity: i64,
    /// Earliest expiration among lots still holding stock.
    pub nearest_expiration: Option<NaiveDate>,
}
