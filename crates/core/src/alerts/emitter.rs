//! Alert emitter.
//!
//! Scans one product at a time for three independent conditions - zero
//! stock, near expiry, excess stock - and emits a discrete notice for each.
//! Conditions are not mutually exclusive; all may fire together.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::demand::DemandEstimator;
use crate::movement::{MovementEvent, net_effect};
use crate::replenishment::{ReplenishmentCalculator, ReplenishmentParams};
use crate::report::{Periodo, ReportWindow};
use crate::stock::{ExpiryLot, StockService};

/// Alert categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Aggregate quantity across all lots is zero.
    ZeroStock,
    /// A lot expires within the alert horizon.
    NearExpiry,
    /// Current stock exceeds the shelf-life-bounded maximum.
    ExcessStock,
}

/// Alert severity, consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational.
    Info,
    /// Needs attention soon.
    Warning,
    /// Needs immediate attention.
    Critical,
}

/// A single notice for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Product the notice refers to.
    pub product_id: Uuid,
    /// Alert category.
    pub kind: AlertKind,
    /// Severity tag.
    pub severity: Severity,
    /// Human-readable message with product name and quantities interpolated.
    pub message: String,
}

/// Emitter tunables.
#[derive(Debug, Clone)]
pub struct AlertParams {
    /// Lots expiring within this many days trigger a near-expiry notice.
    pub expiry_alert_days: i64,
    /// Replenishment parameters for the excess-stock check.
    pub replenishment: ReplenishmentParams,
}

impl Default for AlertParams {
    fn default() -> Self {
        Self {
            expiry_alert_days: 7,
            replenishment: ReplenishmentParams::default(),
        }
    }
}

/// Alert emitter over ledger state and recent movement history.
pub struct AlertEmitter;

impl AlertEmitter {
    /// Emits all notices for one product.
    ///
    /// `recent_events` must cover at least the trailing 7 days ending at
    /// `now`; the excess-stock check always uses that fixed window,
    /// independent of any user-chosen report window.
    #[must_use]
    pub fn emit(
        product_id: Uuid,
        product_name: &str,
        lots: &[ExpiryLot],
        recent_events: &[MovementEvent],
        params: &AlertParams,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        let aggregate = StockService::aggregate(product_id, lots);
        if aggregate.total_quantity == 0 {
            alerts.push(Alert {
                product_id,
                kind: AlertKind::ZeroStock,
                severity: Severity::Critical,
                message: format!("O produto {product_name} necessita reabastecimento."),
            });
        }

        for lot in lots {
            if lot.quantity_remaining == 0 {
                continue;
            }
            let days_until = (lot.expiration_date - today).num_days();
            // A lot expiring today (0 days) or already expired does not fire
            // this alert.
            if days_until > 0 && days_until <= params.expiry_alert_days {
                alerts.push(Alert {
                    product_id,
                    kind: AlertKind::NearExpiry,
                    severity: Severity::Warning,
                    message: format!(
                        "{} unidades de {product_name} vencem em {days_until} dia(s).",
                        lot.quantity_remaining
                    ),
                });
            }
        }

        if let Some(alert) =
            Self::check_excess(product_id, product_name, lots, recent_events, params, now, today)
        {
            alerts.push(alert);
        }

        alerts
    }

    /// Excess-stock check over the fixed trailing 7-day window.
    fn check_excess(
        product_id: Uuid,
        product_name: &str,
        lots: &[ExpiryLot],
        recent_events: &[MovementEvent],
        params: &AlertParams,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Option<Alert> {
        let window = ReportWindow::from_preset(Periodo::Semana, now);
        let in_window: Vec<MovementEvent> = recent_events
            .iter()
            .filter(|e| window.contains(e.timestamp))
            .cloned()
            .collect();

        let estimate = DemandEstimator::estimate(&in_window, &window)?;
        let current_stock = net_effect(&in_window);

        let result = ReplenishmentCalculator::calculate(
            product_id,
            &estimate,
            lots,
            current_stock,
            today,
            &params.replenishment,
        );

        result.is_excess.then(|| Alert {
            product_id,
            kind: AlertKind::ExcessStock,
            severity: Severity::Info,
            message: format!(
                "O produto {product_name} está com estoque acima do máximo ({} > {}).",
                result.current_stock, result.max_stock
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lot(product_id: Uuid, days_out: i64, qty: i64) -> ExpiryLot {
        ExpiryLot {
            id: Uuid::now_v7(),
            product_id,
            expiration_date: today() + chrono::Duration::days(days_out),
            quantity_remaining: qty,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2024-05-10T12:00:00Z".parse().unwrap()
    }

    fn emit(lots: &[ExpiryLot], events: &[MovementEvent]) -> Vec<Alert> {
        let product_id = lots
            .first()
            .map_or_else(Uuid::new_v4, |l| l.product_id);
        AlertEmitter::emit(
            product_id,
            "Dipirona 500mg",
            lots,
            events,
            &AlertParams::default(),
            now(),
            today(),
        )
    }

    #[test]
    fn test_zero_stock_alert() {
        let p = Uuid::new_v4();
        let alerts = emit(&[lot(p, 30, 0)], &[]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::ZeroStock);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert!(alerts[0].message.contains("necessita reabastecimento"));
    }

    #[rstest]
    #[case(1, true)]
    #[case(7, true)]
    #[case(0, false)] // expiring today does not fire
    #[case(-1, false)] // already expired does not fire
    #[case(8, false)]
    fn test_near_expiry_boundaries(#[case] days_out: i64, #[case] fires: bool) {
        let p = Uuid::new_v4();
        let alerts = emit(&[lot(p, days_out, 10)], &[]);
        let fired = alerts.iter().any(|a| a.kind == AlertKind::NearExpiry);
        assert_eq!(fired, fires);
    }

    #[test]
    fn test_near_expiry_one_notice_per_lot() {
        let p = Uuid::new_v4();
        let alerts = emit(&[lot(p, 2, 10), lot(p, 5, 3), lot(p, 60, 100)], &[]);
        let near: Vec<_> = alerts
            .iter()
            .filter(|a| a.kind == AlertKind::NearExpiry)
            .collect();
        assert_eq!(near.len(), 2);
        assert!(near[0].message.contains("10 unidades"));
        assert!(near[1].message.contains("3 unidades"));
    }

    #[test]
    fn test_excess_alert_over_trailing_week() {
        let p = Uuid::new_v4();
        // Heavy restock with one small sale in the trailing week: net is far
        // above what one sale per day justifies against a short shelf life.
        let events = vec![
            MovementEvent::added(p, 200, "2024-05-08T12:00:00Z".parse().unwrap()),
            MovementEvent::removed(p, 1, "2024-05-09T12:00:00Z".parse().unwrap()),
        ];
        let alerts = emit(&[lot(p, 10, 199)], &events);
        let excess: Vec<_> = alerts
            .iter()
            .filter(|a| a.kind == AlertKind::ExcessStock)
            .collect();
        assert_eq!(excess.len(), 1);
        assert!(excess[0].message.contains("acima do máximo"));
    }

    #[test]
    fn test_no_sales_no_excess_check() {
        let p = Uuid::new_v4();
        let events = vec![MovementEvent::added(p, 500, now())];
        let alerts = emit(&[lot(p, 10, 500)], &events);
        assert!(!alerts.iter().any(|a| a.kind == AlertKind::ExcessStock));
    }

    #[test]
    fn test_conditions_fire_together() {
        let p = Uuid::new_v4();
        // Zero stock AND excess are contradictory, but zero stock plus a
        // near-expiry lot on another product state can coexist; here an empty
        // lot plus a near-expiry lot fires both notices.
        let alerts = emit(&[lot(p, 3, 0), lot(p, 3, 0)], &[]);
        assert!(alerts.iter().any(|a| a.kind == AlertKind::ZeroStock));
        // Both lots are empty so no near-expiry; now with stock:
        let alerts = emit(&[lot(p, 3, 4)], &[]);
        assert!(alerts.iter().any(|a| a.kind == AlertKind::NearExpiry));
    }
}
