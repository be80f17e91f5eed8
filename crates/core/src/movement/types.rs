//! Movement event types.
//!
//! Every stock-level change (lot addition, sale withdrawal, quantity edit)
//! produces exactly one movement event. Events are immutable once created and
//! are the source of truth for all derived demand statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of stock mutation a movement event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Stock added (new lot received).
    Added,
    /// Stock removed through a sale.
    Removed,
    /// Direct quantity override on a lot.
    Edited,
}

/// A single entry in the append-only movement ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEvent {
    /// Product this movement belongs to.
    pub product_id: Uuid,
    /// Operation kind.
    pub kind: MovementKind,
    /// Magnitude of the change, always positive.
    pub quantity: i64,
    /// Signed quantity effect consistent with the mutation applied.
    pub signed_effect: i64,
    /// When the mutation happened (UTC).
    pub timestamp: DateTime<Utc>,
}

impl MovementEvent {
    /// Records a stock addition of `quantity` units.
    #[must_use]
    pub fn added(product_id: Uuid, quantity: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            product_id,
            kind: MovementKind::Added,
            quantity,
            signed_effect: quantity,
            timestamp,
        }
    }

    /// Records a sale withdrawal of `quantity` units.
    #[must_use]
    pub fn removed(product_id: Uuid, quantity: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            product_id,
            kind: MovementKind::Removed,
            quantity,
            signed_effect: -quantity,
            timestamp,
        }
    }

    /// Records a direct edit whose net effect on stock is `delta` (may be
    /// negative).
    #[must_use]
    pub fn edited(product_id: Uuid, delta: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            product_id,
            kind: MovementKind::Edited,
            quantity: delta.abs(),
            signed_effect: delta,
            timestamp,
        }
    }
}

/// Sums the signed effects of a slice of events (in-window net stock change).
#[must_use]
pub fn net_effect(events: &[MovementEvent]) -> i64 {
    events.iter().map(|e| e.signed_effect).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_signed_effects() {
        let p = Uuid::new_v4();
        assert_eq!(MovementEvent::added(p, 10, ts()).signed_effect, 10);
        assert_eq!(MovementEvent::removed(p, 4, ts()).signed_effect, -4);
        assert_eq!(MovementEvent::edited(p, -3, ts()).signed_effect, -3);
        assert_eq!(MovementEvent::edited(p, -3, ts()).quantity, 3);
    }

    #[test]
    fn test_net_effect() {
        let p = Uuid::new_v4();
        let events = vec![
            MovementEvent::added(p, 10, ts()),
            MovementEvent::removed(p, 4, ts()),
            MovementEvent::edited(p, -2, ts()),
        ];
        assert_eq!(net_effect(&events), 4);
    }
}
