//! One match → one VEVENT block.

use crate::config::CalendarConfig;
use crate::error::MatchCalResult;
use crate::fixture::MatchRecord;

use super::datetime::{add_minutes, format_utc};
use super::text::{escape_text, fold_line};

/// Content lines of a single VEVENT, each already folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EventBlock {
    lines: Vec<String>,
}

impl EventBlock {
    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, line: impl AsRef<str>) {
        self.lines.push(fold_line(line.as_ref()));
    }

    fn push_text(&mut self, name: &str, value: &str) {
        self.push(format!("{}:{}", name, escape_text(value)));
    }
}

/// Build the VEVENT for `record`. `dtstamp` is the already formatted
/// generation time shared by every event in the document.
pub(crate) fn build_event(
    record: &MatchRecord,
    config: &CalendarConfig,
    dtstamp: &str,
) -> MatchCalResult<EventBlock> {
    let start = record.start()?;
    let end = add_minutes(start, config.match_duration_minutes)?;

    let mut block = EventBlock {
        lines: Vec::with_capacity(16),
    };

    block.push("BEGIN:VEVENT");
    block.push(format!("UID:{}", event_uid(record, config)));
    block.push(format!("DTSTAMP:{}", dtstamp));
    block.push(format!("DTSTART:{}", format_utc(start)));
    block.push(format!("DTEND:{}", format_utc(end)));
    block.push_text("SUMMARY", &summary(record));
    block.push_text("DESCRIPTION", &description(record, config));
    block.push(format!("STATUS:{}", record.status.event_status().as_ics_str()));
    block.push("TRANSP:OPAQUE");

    if let Some(venue) = record.venue() {
        block.push_text("LOCATION", venue);
    }

    // Results need no reminder
    if !record.status.is_finished() {
        block.push("BEGIN:VALARM");
        block.push(format!("TRIGGER:{}", config.alarm_trigger()));
        block.push("ACTION:DISPLAY");
        block.push_text("DESCRIPTION", &config.alarm_description());
        block.push("END:VALARM");
    }

    block.push("END:VEVENT");

    Ok(block)
}

/// `match-<id>@<domain>`; stable across regenerations so clients update in place.
pub fn event_uid(record: &MatchRecord, config: &CalendarConfig) -> String {
    format!("match-{}@{}", record.id, config.calendar_domain)
}

/// `<home> vs <away>`, preferring short team names.
pub fn summary(record: &MatchRecord) -> String {
    format!(
        "{} vs {}",
        record.home_team.display_name(),
        record.away_team.display_name()
    )
}

/// Unescaped, newline-separated DESCRIPTION text.
pub fn description(record: &MatchRecord, config: &CalendarConfig) -> String {
    let mut lines = vec![format!("Competition: {}", record.competition.name)];

    if let Some(matchday) = record.matchday {
        lines.push(format!("Matchday: {}", matchday));
    }
    if let Some(venue) = record.venue() {
        lines.push(format!("Venue: {}", venue));
    }

    let side = if record.is_home_for(config.team_id) {
        "Home"
    } else {
        "Away"
    };
    lines.push(side.to_string());

    if let Some((home, away)) = record.final_score() {
        lines.push(format!("Score: {} - {}", home, away));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchCalError;
    use crate::fixture::{Competition, FullTimeScore, MatchStatus, Score, Team};

    const DTSTAMP: &str = "20250301T120000Z";

    fn make_test_match() -> MatchRecord {
        MatchRecord {
            id: 12345,
            competition: Competition {
                name: "Primera Division".to_string(),
                code: Some("PD".to_string()),
            },
            utc_date: "2025-03-15T20:00:00Z".to_string(),
            status: MatchStatus::Scheduled,
            matchday: Some(28),
            home_team: Team {
                id: 81,
                name: "FC Barcelona".to_string(),
                short_name: Some("FCB".to_string()),
            },
            away_team: Team {
                id: 86,
                name: "Real Madrid CF".to_string(),
                short_name: Some("RMA".to_string()),
            },
            venue: Some("Camp Nou".to_string()),
            score: Score::default(),
        }
    }

    fn build(record: &MatchRecord) -> Vec<String> {
        build_event(record, &CalendarConfig::default(), DTSTAMP)
            .unwrap()
            .lines()
            .to_vec()
    }

    #[test]
    fn test_scheduled_match_lines_in_order() {
        let lines = build(&make_test_match());

        assert_eq!(
            lines,
            vec![
                "BEGIN:VEVENT",
                "UID:match-12345@barca-calendar.vercel.app",
                "DTSTAMP:20250301T120000Z",
                "DTSTART:20250315T200000Z",
                "DTEND:20250315T220000Z",
                "SUMMARY:FCB vs RMA",
                // 78 octets, so the last three characters move to a continuation line
                "DESCRIPTION:Competition: Primera Division\\nMatchday: 28\\nVenue: Camp Nou\\nH\r\n ome",
                "STATUS:CONFIRMED",
                "TRANSP:OPAQUE",
                "LOCATION:Camp Nou",
                "BEGIN:VALARM",
                "TRIGGER:-PT3H",
                "ACTION:DISPLAY",
                "DESCRIPTION:Barça plays in 3 hours!",
                "END:VALARM",
                "END:VEVENT",
            ]
        );
    }

    #[test]
    fn test_finished_match_has_score_and_no_alarm() {
        let mut record = make_test_match();
        record.status = MatchStatus::Finished;
        record.score = Score {
            full_time: FullTimeScore {
                home: Some(2),
                away: Some(1),
            },
        };

        let lines = build(&record);

        let description = lines
            .iter()
            .find(|l| l.starts_with("DESCRIPTION:"))
            .unwrap()
            .replace("\r\n ", "");
        assert!(
            description.ends_with("\\nHome\\nScore: 2 - 1"),
            "Unexpected description: {}",
            description
        );
        assert!(!lines.iter().any(|l| l == "BEGIN:VALARM"));
        assert!(lines.contains(&"STATUS:CONFIRMED".to_string()));
    }

    #[test]
    fn test_finished_match_without_score_omits_score_line() {
        let mut record = make_test_match();
        record.status = MatchStatus::Finished;
        record.score.full_time.home = Some(3);

        let text = description(&record, &CalendarConfig::default());
        assert!(!text.contains("Score:"), "Unexpected score in: {}", text);
    }

    #[test]
    fn test_live_match_with_score_has_no_score_line() {
        let mut record = make_test_match();
        record.status = MatchStatus::InPlay;
        record.score.full_time = FullTimeScore {
            home: Some(1),
            away: Some(1),
        };

        let lines = build(&record);
        assert!(!lines.iter().any(|l| l.contains("Score")));
        assert!(lines.iter().any(|l| l == "BEGIN:VALARM"));
    }

    #[test]
    fn test_postponed_and_cancelled_map_to_cancelled() {
        for status in [MatchStatus::Postponed, MatchStatus::Cancelled] {
            let mut record = make_test_match();
            record.status = status;

            let lines = build(&record);
            assert!(
                lines.contains(&"STATUS:CANCELLED".to_string()),
                "{} should be cancelled: {:?}",
                status,
                lines
            );
            // Still upcoming as far as alarms go
            assert!(lines.iter().any(|l| l == "BEGIN:VALARM"));
        }
    }

    #[test]
    fn test_away_marker_when_tracked_team_is_away() {
        let mut record = make_test_match();
        std::mem::swap(&mut record.home_team, &mut record.away_team);

        let text = description(&record, &CalendarConfig::default());
        assert!(text.ends_with("\nAway"), "Expected Away marker: {}", text);
        assert_eq!(summary(&record), "RMA vs FCB");
    }

    #[test]
    fn test_missing_venue_and_matchday() {
        let mut record = make_test_match();
        record.venue = None;
        record.matchday = None;

        let lines = build(&record);
        assert!(!lines.iter().any(|l| l.starts_with("LOCATION")));
        assert_eq!(
            description(&record, &CalendarConfig::default()),
            "Competition: Primera Division\nHome"
        );
    }

    #[test]
    fn test_summary_falls_back_to_full_name() {
        let mut record = make_test_match();
        record.away_team.short_name = None;
        record.home_team.short_name = Some(String::new());

        assert_eq!(summary(&record), "FC Barcelona vs Real Madrid CF");
    }

    #[test]
    fn test_text_values_are_escaped_and_folded() {
        let mut record = make_test_match();
        record.venue = Some("Estadi Olímpic Lluís Companys; Montjuïc, Barcelona, Catalunya, Spain, Europe".to_string());

        let lines = build(&record);
        let location = lines.iter().find(|l| l.starts_with("LOCATION:")).unwrap();

        assert!(location.contains("\\;"));
        assert!(location.contains("\\,"));
        assert!(location.contains("\r\n "), "LOCATION should be folded: {:?}", location);
        for physical in location.split("\r\n") {
            assert!(physical.len() <= 75);
        }
    }

    #[test]
    fn test_custom_duration_and_alarm() {
        let config = CalendarConfig {
            match_duration_minutes: 105,
            alarm_minutes_before: 45,
            team_name: "Culers, united".to_string(),
            ..CalendarConfig::default()
        };

        let block = build_event(&make_test_match(), &config, DTSTAMP).unwrap();
        let lines = block.lines();

        assert!(lines.contains(&"DTEND:20250315T214500Z".to_string()));
        assert!(lines.contains(&"TRIGGER:-PT45M".to_string()));
        assert!(lines.contains(&"DESCRIPTION:Culers\\, united plays in 45 minutes!".to_string()));
    }

    #[test]
    fn test_bad_kickoff_is_format_error() {
        let mut record = make_test_match();
        record.utc_date = "2025-03-15 20h".to_string();

        let result = build_event(&record, &CalendarConfig::default(), DTSTAMP);
        assert!(matches!(result, Err(MatchCalError::Format { .. })));
    }
}
