//! Analysis window selection for movement reports.
//!
//! A window is chosen either by explicit start/end dates or by a named
//! preset (`semana`, `mes`, `ano`). Invalid or inverted explicit ranges are
//! recovered locally: the default 7-day window is substituted, a notice flag
//! is set, and the request still succeeds.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed display offset applied before bucketing timestamps by calendar day.
/// A locale display rule, not a timezone-aware conversion.
pub const DISPLAY_OFFSET_HOURS: i64 = -3;

/// Shifts a UTC timestamp by the fixed display offset and returns its
/// calendar date. All daily bucketing goes through here.
#[must_use]
pub fn display_date(ts: DateTime<Utc>) -> NaiveDate {
    (ts + Duration::hours(DISPLAY_OFFSET_HOURS)).date_naive()
}

/// Named window presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodo {
    /// Trailing 7 days (the default).
    Semana,
    /// Trailing 30 days.
    Mes,
    /// Trailing 365 days.
    Ano,
}

impl Periodo {
    /// Window length in days.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Semana => 7,
            Self::Mes => 30,
            Self::Ano => 365,
        }
    }
}

impl Default for Periodo {
    fn default() -> Self {
        Self::Semana
    }
}

/// Raw window selection as submitted by the caller. The two modes are
/// mutually exclusive; explicit dates win when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowSelection {
    /// Explicit start date (`YYYY-MM-DD`).
    pub inicio: Option<String>,
    /// Explicit end date (`YYYY-MM-DD`).
    pub fim: Option<String>,
    /// Named preset, used when no explicit dates are given.
    pub periodo: Option<Periodo>,
}

/// A resolved, inclusive analysis window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWindow {
    /// Window start (inclusive, UTC).
    pub start: DateTime<Utc>,
    /// Window end (inclusive, UTC).
    pub end: DateTime<Utc>,
    /// Set when an invalid explicit range was replaced by the default
    /// 7-day window; surfaces as a user-facing notice.
    pub fallback_applied: bool,
}

impl ReportWindow {
    /// Resolves a trailing preset window ending at `now`.
    #[must_use]
    pub fn from_preset(periodo: Periodo, now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(periodo.days()),
            end: now,
            fallback_applied: false,
        }
    }

    /// Resolves a window from the caller's selection.
    ///
    /// Explicit dates take precedence over the preset. A missing, malformed,
    /// or inverted explicit range falls back to the 7-day default with
    /// `fallback_applied` set; this never fails.
    #[must_use]
    pub fn resolve(selection: &WindowSelection, now: DateTime<Utc>) -> Self {
        if selection.inicio.is_none() && selection.fim.is_none() {
            return Self::from_preset(selection.periodo.unwrap_or_default(), now);
        }

        let parsed = Self::parse_explicit(selection);
        match parsed {
            Some((inicio, fim)) if inicio <= fim => Self {
                start: inicio.and_time(NaiveTime::MIN).and_utc(),
                end: fim
                    .and_hms_opt(23, 59, 59)
                    .unwrap_or_else(|| fim.and_time(NaiveTime::MIN))
                    .and_utc(),
                fallback_applied: false,
            },
            _ => {
                let mut window = Self::from_preset(Periodo::Semana, now);
                window.fallback_applied = true;
                window
            }
        }
    }

    fn parse_explicit(selection: &WindowSelection) -> Option<(NaiveDate, NaiveDate)> {
        let inicio = selection.inicio.as_deref()?;
        let fim = selection.fim.as_deref()?;
        let inicio = NaiveDate::parse_from_str(inicio, "%Y-%m-%d").ok()?;
        let fim = NaiveDate::parse_from_str(fim, "%Y-%m-%d").ok()?;
        Some((inicio, fim))
    }

    /// Whether a timestamp falls inside the window (inclusive bounds).
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn selection(inicio: Option<&str>, fim: Option<&str>, periodo: Option<Periodo>) -> WindowSelection {
        WindowSelection {
            inicio: inicio.map(String::from),
            fim: fim.map(String::from),
            periodo,
        }
    }

    #[test]
    fn test_default_is_seven_days() {
        let now = Utc::now();
        let window = ReportWindow::resolve(&WindowSelection::default(), now);
        assert_eq!(window.end - window.start, Duration::days(7));
        assert!(!window.fallback_applied);
    }

    #[rstest]
    #[case(Periodo::Semana, 7)]
    #[case(Periodo::Mes, 30)]
    #[case(Periodo::Ano, 365)]
    fn test_presets(#[case] periodo: Periodo, #[case] days: i64) {
        let now = Utc::now();
        let window = ReportWindow::resolve(&selection(None, None, Some(periodo)), now);
        assert_eq!(window.end - window.start, Duration::days(days));
    }

    #[test]
    fn test_explicit_range() {
        let now = Utc::now();
        let window =
            ReportWindow::resolve(&selection(Some("2024-01-01"), Some("2024-01-31"), None), now);
        assert!(!window.fallback_applied);
        assert_eq!(
            window.start.date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            window.end.date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        // End of day is inclusive.
        assert!(window.contains("2024-01-31T23:00:00Z".parse().unwrap()));
    }

    #[test]
    fn test_inverted_range_falls_back_with_notice() {
        let now = Utc::now();
        let window =
            ReportWindow::resolve(&selection(Some("2024-02-01"), Some("2024-01-01"), None), now);
        assert!(window.fallback_applied);
        assert_eq!(window.end - window.start, Duration::days(7));
        assert_eq!(window.end, now);
    }

    #[rstest]
    #[case(Some("not-a-date"), Some("2024-01-31"))]
    #[case(Some("2024-01-01"), None)]
    #[case(None, Some("2024-01-31"))]
    fn test_malformed_explicit_falls_back(#[case] inicio: Option<&str>, #[case] fim: Option<&str>) {
        let now = Utc::now();
        let window = ReportWindow::resolve(&selection(inicio, fim, None), now);
        assert!(window.fallback_applied);
        assert_eq!(window.end - window.start, Duration::days(7));
    }

    #[test]
    fn test_display_date_shifts_back_three_hours() {
        let ts: DateTime<Utc> = "2024-06-10T01:30:00Z".parse().unwrap();
        assert_eq!(
            display_date(ts),
            NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
        );

        let ts: DateTime<Utc> = "2024-06-10T12:00:00Z".parse().unwrap();
        assert_eq!(
            display_date(ts),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
    }
}
