//! Match (fixture) types.
//!
//! These mirror the football-data.org v4 response shape closely enough that a
//! provider can deserialize its payload straight into them. The encoder only
//! ever reads these values; nothing in this crate mutates a `MatchRecord`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MatchCalError, MatchCalResult};

/// A single fixture as supplied by a match source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: u64,
    pub competition: Competition,
    /// Kickoff instant as delivered upstream (RFC 3339, UTC).
    /// Kept as text so that a malformed value surfaces when the calendar is built.
    pub utc_date: String,
    pub status: MatchStatus,
    #[serde(default)]
    pub matchday: Option<u32>,
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub score: Score,
}

impl MatchRecord {
    /// Kickoff as a UTC instant.
    pub fn start(&self) -> MatchCalResult<DateTime<Utc>> {
        crate::ics::parse_instant(&self.utc_date)
    }

    /// Whether `team_id` plays this match at home.
    pub fn is_home_for(&self, team_id: u64) -> bool {
        self.home_team.id == team_id
    }

    /// Venue, treating an empty string as absent.
    pub fn venue(&self) -> Option<&str> {
        self.venue.as_deref().filter(|v| !v.is_empty())
    }

    /// Full-time result as (home, away), only once the match is finished and
    /// both sides of the score are known.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        if !self.status.is_finished() {
            return None;
        }
        match (self.score.full_time.home, self.score.full_time.away) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
}

impl Team {
    /// Short name when the source provides one, otherwise the full name.
    pub fn display_name(&self) -> &str {
        match self.short_name.as_deref() {
            Some(short) if !short.is_empty() => short,
            _ => &self.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(default)]
    pub full_time: FullTimeScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullTimeScore {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

/// Lifecycle state of a match, as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Timed,
    Live,
    InPlay,
    Paused,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 9] = [
        MatchStatus::Scheduled,
        MatchStatus::Timed,
        MatchStatus::Live,
        MatchStatus::InPlay,
        MatchStatus::Paused,
        MatchStatus::Finished,
        MatchStatus::Postponed,
        MatchStatus::Suspended,
        MatchStatus::Cancelled,
    ];

    pub fn as_api_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::Live => "LIVE",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchStatus::Finished)
    }

    /// The calendar STATUS this match should be published with.
    pub fn event_status(&self) -> EventStatus {
        match self {
            MatchStatus::Postponed | MatchStatus::Cancelled => EventStatus::Cancelled,
            MatchStatus::Scheduled
            | MatchStatus::Timed
            | MatchStatus::Live
            | MatchStatus::InPlay
            | MatchStatus::Paused
            | MatchStatus::Finished
            | MatchStatus::Suspended => EventStatus::Confirmed,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl FromStr for MatchStatus {
    type Err = MatchCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        MatchStatus::ALL
            .into_iter()
            .find(|status| status.as_api_str() == wanted)
            .ok_or_else(|| MatchCalError::Config(format!("Unknown match status '{}'", s)))
    }
}

/// Calendar event status (RFC 5545 STATUS for VEVENT), restricted to the two
/// values a fixture feed publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Confirmed,
    Cancelled,
}

impl EventStatus {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "CONFIRMED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Top-level shape of the upstream `/teams/{id}/matches` response.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchRecord>,
}
