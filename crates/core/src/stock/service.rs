//! FEFO withdrawal planning and lot aggregation.
//!
//! This module is pure: it computes allocations against a snapshot of lots
//! and never mutates anything. The database layer applies a returned
//! `WithdrawalPlan` inside a transaction, so a shortfall detected here means
//! no lot is ever touched.

use uuid::Uuid;

use super::error::StockError;
use super::types::{ExpiryLot, LotDraw, ProductAggregate, WithdrawalPlan};

/// Expiry ledger service.
pub struct StockService;

impl StockService {
    /// Plans a FEFO withdrawal of `requested` units from `lots`.
    ///
    /// Lots are consumed in ascending `(expiration_date, id)` order until the
    /// requested quantity is satisfied. Empty lots are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StockError::NonPositiveQuantity` for a zero or negative
    /// request, and `StockError::Insufficient` when the aggregate available
    /// quantity is less than `requested` - in which case the caller must not
    /// mutate any lot.
    pub fn plan_withdrawal(
        lots: &[ExpiryLot],
        requested: i64,
    ) -> Result<WithdrawalPlan, StockError> {
        if requested <= 0 {
            return Err(StockError::NonPositiveQuantity(requested));
        }

        let available: i64 = lots.iter().map(|l| l.quantity_remaining).sum();
        if available < requested {
            return Err(StockError::Insufficient {
                requested,
                available,
            });
        }

        let mut ordered: Vec<&ExpiryLot> =
            lots.iter().filter(|l| l.quantity_remaining > 0).collect();
        ordered.sort_by_key(|l| (l.expiration_date, l.id));

        let mut draws = Vec::new();
        let mut outstanding = requested;

        for lot in ordered {
            if outstanding == 0 {
                break;
            }
            let consumed = outstanding.min(lot.quantity_remaining);
            draws.push(LotDraw {
                lot_id: lot.id,
                consumed,
                remaining_after: lot.quantity_remaining - consumed,
            });
            outstanding -= consumed;
        }

        debug_assert_eq!(outstanding, 0);

        Ok(WithdrawalPlan {
            draws,
            total: requested,
        })
    }

    /// Builds the derived per-product aggregate from its lots.
    #[must_use]
    pub fn aggregate(product_id: Uuid, lots: &[ExpiryLot]) -> ProductAggregate {
        let total_quantity = lots.iter().map(|l| l.quantity_remaining).sum();
        let nearest_expiration = lots
            .iter()
            .filter(|l| l.quantity_remaining > 0)
            .map(|l| l.expiration_date)
            .min();

        ProductAggregate {
            product_id,
            total_quantity,
            nearest_expiration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lot(exp: (i32, u32, u32), qty: i64) -> ExpiryLot {
        ExpiryLot {
            id: Uuid::now_v7(),
            product_id: Uuid::new_v4(),
            expiration_date: NaiveDate::from_ymd_opt(exp.0, exp.1, exp.2).unwrap(),
            quantity_remaining: qty,
        }
    }

    #[test]
    fn test_fefo_consumes_earliest_expiration_first() {
        // A(exp=2024-01-01, qty=5), B(exp=2024-02-01, qty=5), withdraw 7:
        // all of A and 2 of B.
        let a = lot((2024, 1, 1), 5);
        let b = lot((2024, 2, 1), 5);
        // Present out of order to prove sorting is by expiration.
        let lots = vec![b.clone(), a.clone()];

        let plan = StockService::plan_withdrawal(&lots, 7).unwrap();

        assert_eq!(plan.draws.len(), 2);
        assert_eq!(plan.draws[0].lot_id, a.id);
        assert_eq!(plan.draws[0].consumed, 5);
        assert_eq!(plan.draws[0].remaining_after, 0);
        assert_eq!(plan.draws[1].lot_id, b.id);
        assert_eq!(plan.draws[1].consumed, 2);
        assert_eq!(plan.draws[1].remaining_after, 3);
        assert_eq!(plan.depleted_lot_ids(), vec![a.id]);
    }

    #[test]
    fn test_ties_broken_by_lot_id() {
        let first = lot((2024, 1, 1), 3);
        let second = lot((2024, 1, 1), 3);
        let lots = vec![second.clone(), first.clone()];

        let plan = StockService::plan_withdrawal(&lots, 4).unwrap();
        // UUID v7 is time-ordered, so `first` was created first and wins.
        assert_eq!(plan.draws[0].lot_id, first.id);
        assert_eq!(plan.draws[0].consumed, 3);
        assert_eq!(plan.draws[1].lot_id, second.id);
        assert_eq!(plan.draws[1].consumed, 1);
    }

    #[test]
    fn test_shortfall_fails_without_plan() {
        let lots = vec![lot((2024, 1, 1), 5), lot((2024, 2, 1), 5)];

        let result = StockService::plan_withdrawal(&lots, 11);
        assert_eq!(
            result,
            Err(StockError::Insufficient {
                requested: 11,
                available: 10
            })
        );
    }

    #[test]
    fn test_exact_drain() {
        let lots = vec![lot((2024, 1, 1), 5), lot((2024, 2, 1), 5)];
        let plan = StockService::plan_withdrawal(&lots, 10).unwrap();
        assert_eq!(plan.total, 10);
        assert_eq!(plan.depleted_lot_ids().len(), 2);
    }

    #[test]
    fn test_empty_lots_are_skipped() {
        let drained = lot((2023, 12, 1), 0);
        let live = lot((2024, 1, 1), 5);
        let plan = StockService::plan_withdrawal(&[drained, live.clone()], 2).unwrap();
        assert_eq!(plan.draws.len(), 1);
        assert_eq!(plan.draws[0].lot_id, live.id);
    }

    #[test]
    fn test_non_positive_request_rejected() {
        let lots = vec![lot((2024, 1, 1), 5)];
        assert_eq!(
            StockService::plan_withdrawal(&lots, 0),
            Err(StockError::NonPositiveQuantity(0))
        );
        assert_eq!(
            StockService::plan_withdrawal(&lots, -2),
            Err(StockError::NonPositiveQuantity(-2))
        );
    }

    #[test]
    fn test_aggregate() {
        let product_id = Uuid::new_v4();
        let mut a = lot((2024, 3, 1), 4);
        let mut b = lot((2024, 1, 1), 0);
        let mut c = lot((2024, 2, 1), 2);
        a.product_id = product_id;
        b.product_id = product_id;
        c.product_id = product_id;

        let agg = StockService::aggregate(product_id, &[a, b, c]);
        assert_eq!(agg.total_quantity, 6);
        // The empty 2024-01-01 lot does not count toward nearest expiration.
        assert_eq!(
            agg.nearest_expiration,
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
    }

    #[test]
    fn test_aggregate_no_lots() {
        let agg = StockService::aggregate(Uuid::new_v4(), &[]);
        assert_eq!(agg.total_quantity, 0);
        assert_eq!(agg.nearest_expiration, None);
    }
}
