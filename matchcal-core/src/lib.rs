//! Core types for the matchcal ecosystem.
//!
//! This crate provides what the CLI, the feed server and the providers share:
//! - `fixture`: match records as delivered by a source
//! - `ics`: the calendar encoder
//! - `config`: encoder settings plus the layered app configuration
//! - `source`: the seam providers implement

pub mod config;
pub mod date_range;
pub mod error;
pub mod fixture;
pub mod ics;
pub mod source;

pub use config::{CalendarConfig, MatchCalConfig};
pub use date_range::DateRange;
pub use error::{MatchCalError, MatchCalResult};
pub use fixture::{EventStatus, MatchRecord, MatchStatus, MatchesResponse, Team};
pub use source::MatchSource;
