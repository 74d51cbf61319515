//! Calendar document assembly.

use chrono::{DateTime, Utc};

use crate::config::CalendarConfig;
use crate::error::MatchCalResult;
use crate::fixture::MatchRecord;

use super::datetime::format_utc;
use super::event::build_event;
use super::text::{escape_text, fold_line};

const CRLF: &str = "\r\n";

/// Generate the full VCALENDAR document for `matches`, in the given order.
///
/// `generated_at` becomes the DTSTAMP of every event. Any record that cannot
/// be encoded fails the whole document; nothing partial is returned.
pub fn generate_calendar(
    matches: &[MatchRecord],
    config: &CalendarConfig,
    generated_at: DateTime<Utc>,
) -> MatchCalResult<String> {
    let dtstamp = format_utc(generated_at);

    let mut lines = calendar_header(config);
    for record in matches {
        let block = build_event(record, config, &dtstamp)?;
        lines.extend_from_slice(block.lines());
    }
    lines.push("END:VCALENDAR".to_string());

    tracing::debug!(events = matches.len(), dtstamp = %dtstamp, "generated calendar");

    let mut output = lines.join(CRLF);
    output.push_str(CRLF);
    Ok(output)
}

fn calendar_header(config: &CalendarConfig) -> Vec<String> {
    vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        fold_line(&format!("PRODID:{}", config.product_id())),
        fold_line(&format!("X-WR-CALNAME:{}", escape_text(&config.calendar_name))),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ]
}
