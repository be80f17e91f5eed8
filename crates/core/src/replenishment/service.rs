//! Replenishment calculator.
//!
//! Combines demand statistics with expiry-ledger shelf-life data to produce
//! safety stock, reorder point, maximum stock, and an order suggestion.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use super::types::{ReplenishmentParams, ReplenishmentResult};
use crate::demand::DemandEstimate;
use crate::stock::ExpiryLot;

/// Replenishment calculator over demand estimates and lot state.
pub struct ReplenishmentCalculator;

impl ReplenishmentCalculator {
    /// Computes replenishment figures for one product.
    ///
    /// `current_stock` is the in-window signed net of movement events, not
    /// the live ledger total; `lots` supply the shelf-life bound.
    #[must_use]
    pub fn calculate(
        product_id: Uuid,
        estimate: &DemandEstimate,
        lots: &[ExpiryLot],
        current_stock: i64,
        today: NaiveDate,
        params: &ReplenishmentParams,
    ) -> ReplenishmentResult {
        let safety_stock = round_to_units(params.service_level_z * estimate.std_dev);
        // No supplier lead time modeled; lead time 0 makes the reorder point
        // equal to the safety stock.
        let reorder_point = safety_stock;

        let shelf_life = Self::avg_shelf_life_days(lots, today, params.default_shelf_life_days);
        let max_stock = round_to_units(estimate.mean_daily * shelf_life);

        let suggested_order_qty = if current_stock < reorder_point {
            (max_stock - current_stock)
                .min(reorder_point - current_stock)
                .max(0)
        } else {
            0
        };

        let days_of_supply_remaining = if estimate.mean_daily > Decimal::ZERO {
            (Decimal::from(current_stock) / estimate.mean_daily).round_dp(2)
        } else {
            Decimal::ZERO
        };

        ReplenishmentResult {
            product_id,
            demand_mean_daily: estimate.mean_daily,
            safety_stock,
            reorder_point,
            max_stock,
            current_stock,
            suggested_order_qty,
            days_of_supply_remaining,
            is_excess: current_stock > max_stock,
        }
    }

    /// Average days-until-expiration across future-dated, non-empty lots;
    /// `default_days` when no such lot exists.
    #[must_use]
    pub fn avg_shelf_life_days(
        lots: &[ExpiryLot],
        today: NaiveDate,
        default_days: i64,
    ) -> Decimal {
        let days: Vec<i64> = lots
            .iter()
            .filter(|l| l.quantity_remaining > 0 && l.expiration_date > today)
            .map(|l| (l.expiration_date - today).num_days())
            .collect();

        if days.is_empty() {
            return Decimal::from(default_days);
        }

        Decimal::from(days.iter().sum::<i64>()) / Decimal::from(days.len())
    }
}

/// Rounds a decimal quantity to whole units (banker's rounding, matching the
/// behavior the reports were tuned against).
fn round_to_units(value: Decimal) -> i64 {
    value.round().to_i64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn estimate(mean: Decimal, std_dev: Decimal) -> DemandEstimate {
        DemandEstimate {
            first_day: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            last_day: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            active_days: 3,
            total_removed: 10,
            mean_daily: mean,
            std_dev,
        }
    }

    fn lot(product_id: Uuid, exp: NaiveDate, qty: i64) -> ExpiryLot {
        ExpiryLot {
            id: Uuid::now_v7(),
            product_id,
            expiration_date: exp,
            quantity_remaining: qty,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_full_calculation() {
        let product_id = Uuid::new_v4();
        let est = estimate(dec!(10) / dec!(3), dec!(2.89));
        let lots = vec![
            lot(product_id, today() + chrono::Duration::days(10), 5),
            lot(product_id, today() + chrono::Duration::days(20), 5),
        ];
        let params = ReplenishmentParams::default();

        let result =
            ReplenishmentCalculator::calculate(product_id, &est, &lots, 2, today(), &params);

        // safety = round(1.65 * 2.89) = round(4.7685) = 5
        assert_eq!(result.safety_stock, 5);
        assert_eq!(result.reorder_point, 5);
        // shelf life avg(10, 20) = 15; max = round(10/3 * 15) = 50
        assert_eq!(result.max_stock, 50);
        assert_eq!(result.current_stock, 2);
        // below reorder point: min(50-2, 5-2) = 3
        assert_eq!(result.suggested_order_qty, 3);
        assert_eq!(result.days_of_supply_remaining, dec!(0.60));
        assert!(!result.is_excess);
    }

    #[test]
    fn test_above_reorder_point_suggests_nothing() {
        let product_id = Uuid::new_v4();
        let est = estimate(dec!(2), dec!(1));
        let params = ReplenishmentParams::default();

        let result =
            ReplenishmentCalculator::calculate(product_id, &est, &[], 20, today(), &params);

        // safety = round(1.65) = 2, current 20 >= 2
        assert_eq!(result.suggested_order_qty, 0);
        assert_eq!(result.days_of_supply_remaining, dec!(10));
    }

    #[test]
    fn test_excess_flag() {
        let product_id = Uuid::new_v4();
        let est = estimate(dec!(1), Decimal::ZERO);
        let params = ReplenishmentParams::default();

        // max = round(1 * 15) = 15 (default shelf life, no lots)
        let result =
            ReplenishmentCalculator::calculate(product_id, &est, &[], 100, today(), &params);

        assert_eq!(result.max_stock, 15);
        assert!(result.is_excess);
        assert_eq!(result.suggested_order_qty, 0);
    }

    #[test]
    fn test_zero_mean_guards_division() {
        let product_id = Uuid::new_v4();
        let est = estimate(Decimal::ZERO, Decimal::ZERO);
        let params = ReplenishmentParams::default();

        let result =
            ReplenishmentCalculator::calculate(product_id, &est, &[], 5, today(), &params);

        assert_eq!(result.days_of_supply_remaining, Decimal::ZERO);
    }

    #[test]
    fn test_shelf_life_ignores_expired_and_empty_lots() {
        let product_id = Uuid::new_v4();
        let lots = vec![
            // Expired: ignored.
            lot(product_id, today() - chrono::Duration::days(1), 5),
            // Expiring today: not in the future, ignored.
            lot(product_id, today(), 5),
            // Empty: ignored.
            lot(product_id, today() + chrono::Duration::days(30), 0),
            // Counted.
            lot(product_id, today() + chrono::Duration::days(8), 3),
        ];

        let shelf = ReplenishmentCalculator::avg_shelf_life_days(&lots, today(), 15);
        assert_eq!(shelf, dec!(8));
    }

    #[test]
    fn test_shelf_life_default_when_no_future_lots() {
        let shelf = ReplenishmentCalculator::avg_shelf_life_days(&[], today(), 15);
        assert_eq!(shelf, dec!(15));
    }

    #[test]
    fn test_negative_net_still_suggests_bounded_order() {
        let product_id = Uuid::new_v4();
        let est = estimate(dec!(2), dec!(2));
        let params = ReplenishmentParams::default();

        // current below zero (more removals than additions in window).
        let result =
            ReplenishmentCalculator::calculate(product_id, &est, &[], -3, today(), &params);

        // safety = round(3.3) = 3; suggestion = min(30+3, 3+3) = 6
        assert_eq!(result.reorder_point, 3);
        assert_eq!(result.suggested_order_qty, 6);
    }
}
