//! Date window used when asking a source for fixtures.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::config::SourceConfig;
use crate::error::{MatchCalError, MatchCalResult};

/// Inclusive range of calendar days (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Every representable day.
    pub const UNBOUNDED: DateRange = DateRange {
        from: NaiveDate::MIN,
        to: NaiveDate::MAX,
    };

    /// `lookback` days before `today` through `lookforward` days after it,
    /// clamped to the representable calendar.
    pub fn around(today: NaiveDate, lookback: u32, lookforward: u32) -> Self {
        DateRange {
            from: today
                .checked_sub_days(Days::new(u64::from(lookback)))
                .unwrap_or(NaiveDate::MIN),
            to: today
                .checked_add_days(Days::new(u64::from(lookforward)))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Default window from the source settings, centred on the current UTC day.
    pub fn from_source(source: &SourceConfig) -> Self {
        Self::around(
            Utc::now().date_naive(),
            source.lookback_days,
            source.lookforward_days,
        )
    }

    /// Parse optional YYYY-MM-DD bounds, filling gaps from `default`.
    pub fn from_args(from: Option<&str>, to: Option<&str>, default: DateRange) -> MatchCalResult<Self> {
        let from = match from {
            Some(s) => parse_date(s)?,
            None => default.from,
        };
        let to = match to {
            Some(s) => parse_date(s)?,
            None => default.to,
        };

        if from > to {
            return Err(MatchCalError::Config(format!(
                "Date range is empty: {} is after {}",
                from, to
            )));
        }

        Ok(DateRange { from, to })
    }

    /// Whether `instant` falls on a day inside the range.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let day = instant.date_naive();
        self.from <= day && day <= self.to
    }

    /// `dateFrom` query value.
    pub fn from_param(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    /// `dateTo` query value.
    pub fn to_param(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}

fn parse_date(s: &str) -> MatchCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        MatchCalError::Config(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_around_crosses_month_boundaries() {
        let range = DateRange::around(day(2025, 3, 3), 7, 60);

        assert_eq!(range.from_param(), "2025-02-24");
        assert_eq!(range.to_param(), "2025-05-02");
    }

    #[test]
    fn test_around_clamps_huge_windows() {
        let range = DateRange::around(day(2025, 3, 3), u32::MAX, u32::MAX);

        assert_eq!(range, DateRange::UNBOUNDED);
    }

    #[test]
    fn test_from_args_fills_missing_bounds() {
        let default = DateRange::around(day(2025, 3, 15), 7, 60);

        let range = DateRange::from_args(Some("2025-01-01"), None, default).unwrap();
        assert_eq!(range.from, day(2025, 1, 1));
        assert_eq!(range.to, default.to);
    }

    #[test]
    fn test_from_args_rejects_bad_input() {
        let default = DateRange::around(day(2025, 3, 15), 7, 60);

        assert!(DateRange::from_args(Some("15/03/2025"), None, default).is_err());
        assert!(DateRange::from_args(Some("2025-04-01"), Some("2025-03-01"), default).is_err());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange {
            from: day(2025, 3, 1),
            to: day(2025, 3, 31),
        };

        assert!(range.contains(Utc.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_unbounded_fills_one_sided_args() {
        let range = DateRange::from_args(None, Some("2025-03-31"), DateRange::UNBOUNDED).unwrap();

        assert!(range.contains(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()));
    }
}
