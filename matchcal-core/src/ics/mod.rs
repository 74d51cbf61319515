//! iCalendar (RFC 5545) generation for match feeds.
//!
//! The pipeline is fixed: each match goes through [`event`] (which uses the
//! timestamp formatter and the text escaper/folder), and [`generate`] wraps
//! the resulting VEVENT blocks in a VCALENDAR. Everything here is pure; the
//! caller supplies the generation time.

mod datetime;
mod event;
mod generate;
mod text;

pub use datetime::{add_minutes, format_utc, parse_instant};
pub use event::{description, event_uid, summary};
pub use generate::generate_calendar;
pub use text::{MAX_LINE_OCTETS, escape_text, fold_line};

/// Media type for serving a generated calendar.
pub const CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
