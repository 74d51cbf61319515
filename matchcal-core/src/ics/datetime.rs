//! UTC timestamps in iCalendar basic format.

use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::error::{MatchCalError, MatchCalResult};

const ICS_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Render an instant as `YYYYMMDDTHHMMSSZ`; sub-second precision is dropped.
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.trunc_subsecs(0).format(ICS_UTC_FORMAT).to_string()
}

/// `instant` shifted forward by `minutes`, truncated to whole seconds.
pub fn add_minutes(instant: DateTime<Utc>, minutes: u32) -> MatchCalResult<DateTime<Utc>> {
    instant
        .trunc_subsecs(0)
        .checked_add_signed(Duration::minutes(i64::from(minutes)))
        .ok_or_else(|| {
            MatchCalError::format(instant.to_rfc3339(), format!("adding {} minutes overflows", minutes))
        })
}

/// Parse an RFC 3339 instant into UTC.
pub fn parse_instant(iso: &str) -> MatchCalResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| MatchCalError::format(iso, e))
}
