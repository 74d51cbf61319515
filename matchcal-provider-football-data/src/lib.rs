//! football-data.org v4 match source for matchcal.
//!
//! Fetches a team's matches for a date window and hands them over as
//! `MatchRecord`s, exactly in the order the API returns them.

mod client;

pub use client::FootballDataClient;
