//! Demand estimator.
//!
//! Aggregates `removed`-kind movement events inside an analysis window into a
//! daily demand series. The demand rate is computed over the *observed* span
//! of sales (first to last removal), not the full requested window, so
//! zero-activity days outside the observed range do not dilute the rate.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};

use crate::movement::{MovementEvent, MovementKind};
use crate::report::{ReportWindow, display_date};

/// Daily demand statistics for one product over one report invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandEstimate {
    /// First calendar day (display-shifted) with an observed removal.
    pub first_day: NaiveDate,
    /// Last calendar day (display-shifted) with an observed removal.
    pub last_day: NaiveDate,
    /// Days in the observed span, inclusive; at least 1.
    pub active_days: i64,
    /// Total units removed inside the window.
    pub total_removed: i64,
    /// Mean daily demand over the observed span.
    pub mean_daily: Decimal,
    /// Sample standard deviation of the daily buckets (Bessel's correction);
    /// zero when fewer than two buckets exist.
    pub std_dev: Decimal,
}

/// Demand estimator over the movement log.
pub struct DemandEstimator;

impl DemandEstimator {
    /// Estimates daily demand for one product from its movement events.
    ///
    /// Only `removed`-kind events with timestamps inside `window` are
    /// considered. Returns `None` when no such event exists - the product
    /// must then be excluded from the replenishment report entirely, not
    /// zero-filled.
    #[must_use]
    pub fn estimate(events: &[MovementEvent], window: &ReportWindow) -> Option<DemandEstimate> {
        let removals: Vec<&MovementEvent> = events
            .iter()
            .filter(|e| e.kind == MovementKind::Removed && window.contains(e.timestamp))
            .collect();

        if removals.is_empty() {
            return None;
        }

        // Narrow to the observed activity span, not the caller's window.
        let first_day = removals
            .iter()
            .map(|e| display_date(e.timestamp))
            .min()?;
        let last_day = removals
            .iter()
            .map(|e| display_date(e.timestamp))
            .max()?;

        let active_days = (last_day - first_day).num_days().max(0) + 1;
        let total_removed: i64 = removals.iter().map(|e| e.quantity).sum();

        let mean_daily = Decimal::from(total_removed) / Decimal::from(active_days);

        // Zero-filled daily buckets covering every day of the span.
        let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        let mut day = first_day;
        while day <= last_day {
            buckets.insert(day, 0);
            day = day.succ_opt()?;
        }
        for event in &removals {
            if let Some(bucket) = buckets.get_mut(&display_date(event.timestamp)) {
                *bucket += event.quantity;
            }
        }

        let std_dev = sample_std_dev(buckets.values().copied());

        Some(DemandEstimate {
            first_day,
            last_day,
            active_days,
            total_removed,
            mean_daily,
            std_dev,
        })
    }
}

/// Sample standard deviation (divide by n-1); zero for fewer than 2 values.
fn sample_std_dev(values: impl Iterator<Item = i64>) -> Decimal {
    let values: Vec<Decimal> = values.map(Decimal::from).collect();
    let n = values.len();
    if n < 2 {
        return Decimal::ZERO;
    }

    let count = Decimal::from(n);
    let mean = values.iter().sum::<Decimal>() / count;
    let variance = values
        .iter()
        .map(|v| (*v - mean) * (*v - mean))
        .sum::<Decimal>()
        / (count - Decimal::ONE);

    variance.sqrt().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn window(start: &str, end: &str) -> ReportWindow {
        ReportWindow {
            start: ts(start),
            end: ts(end),
            fallback_applied: false,
        }
    }

    #[test]
    fn test_three_day_observed_span_statistics() {
        // Removals of 2 and 3 on day 1 and 5 on day 3: active_days = 3,
        // mean = 10/3, buckets [5, 0, 5], sample std dev ~= 2.89.
        let p = Uuid::new_v4();
        let events = vec![
            MovementEvent::removed(p, 2, ts("2024-05-01T12:00:00Z")),
            MovementEvent::removed(p, 3, ts("2024-05-01T15:00:00Z")),
            MovementEvent::removed(p, 5, ts("2024-05-03T12:00:00Z")),
        ];
        let window = window("2024-04-01T00:00:00Z", "2024-06-01T00:00:00Z");

        let estimate = DemandEstimator::estimate(&events, &window).unwrap();

        assert_eq!(estimate.active_days, 3);
        assert_eq!(estimate.total_removed, 10);
        assert_eq!(estimate.mean_daily.round_dp(2), dec!(3.33));
        assert_eq!(estimate.std_dev.round_dp(2), dec!(2.89));
    }

    #[test]
    fn test_no_removals_yields_no_estimate() {
        let p = Uuid::new_v4();
        let events = vec![
            MovementEvent::added(p, 10, ts("2024-05-01T12:00:00Z")),
            MovementEvent::edited(p, -2, ts("2024-05-02T12:00:00Z")),
        ];
        let window = window("2024-04-01T00:00:00Z", "2024-06-01T00:00:00Z");

        assert!(DemandEstimator::estimate(&events, &window).is_none());
    }

    #[test]
    fn test_removals_outside_window_are_ignored() {
        let p = Uuid::new_v4();
        let events = vec![MovementEvent::removed(p, 5, ts("2024-03-01T12:00:00Z"))];
        let window = window("2024-04-01T00:00:00Z", "2024-06-01T00:00:00Z");

        assert!(DemandEstimator::estimate(&events, &window).is_none());
    }

    #[test]
    fn test_single_day_has_zero_std_dev() {
        let p = Uuid::new_v4();
        let events = vec![
            MovementEvent::removed(p, 2, ts("2024-05-01T10:00:00Z")),
            MovementEvent::removed(p, 4, ts("2024-05-01T18:00:00Z")),
        ];
        let window = window("2024-04-01T00:00:00Z", "2024-06-01T00:00:00Z");

        let estimate = DemandEstimator::estimate(&events, &window).unwrap();
        assert_eq!(estimate.active_days, 1);
        assert_eq!(estimate.mean_daily, dec!(6));
        assert_eq!(estimate.std_dev, Decimal::ZERO);
    }

    #[test]
    fn test_span_narrows_to_observed_activity() {
        // A one-year window with sales on only two consecutive days must use
        // a two-day span, not 365 days.
        let p = Uuid::new_v4();
        let events = vec![
            MovementEvent::removed(p, 3, ts("2024-05-10T12:00:00Z")),
            MovementEvent::removed(p, 5, ts("2024-05-11T12:00:00Z")),
        ];
        let window = window("2024-01-01T00:00:00Z", "2024-12-31T00:00:00Z");

        let estimate = DemandEstimator::estimate(&events, &window).unwrap();
        assert_eq!(estimate.active_days, 2);
        assert_eq!(estimate.mean_daily, dec!(4));
    }

    #[test]
    fn test_display_offset_affects_bucketing() {
        // 01:30 UTC lands on the previous display day (-3h shift), so these
        // two events fall on the same calendar day.
        let p = Uuid::new_v4();
        let events = vec![
            MovementEvent::removed(p, 1, ts("2024-05-02T01:30:00Z")),
            MovementEvent::removed(p, 1, ts("2024-05-01T20:00:00Z")),
        ];
        let window = window("2024-04-01T00:00:00Z", "2024-06-01T00:00:00Z");

        let estimate = DemandEstimator::estimate(&events, &window).unwrap();
        assert_eq!(estimate.active_days, 1);
        assert_eq!(estimate.total_removed, 2);
    }
}
