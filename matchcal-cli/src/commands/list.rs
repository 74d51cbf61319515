use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use matchcal_core::ics::summary;
use matchcal_core::{DateRange, EventStatus, MatchCalConfig, MatchRecord};
use owo_colors::OwoColorize;

use super::fetch_matches;

pub async fn run(config: &MatchCalConfig, range: DateRange) -> Result<()> {
    let matches = fetch_matches(config, &range).await?;

    if matches.is_empty() {
        println!("{}", "No matches found".dimmed());
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut current_date: Option<String> = None;

    for record in &matches {
        let start = record.start()?;
        let date_label = format_date_label(start, today);

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        let time = format!("{:>7}", start.with_timezone(&Local).format("%H:%M"));
        let side = format!("[{}]", side_label(record, config.calendar.team_id));
        let detail = match_detail(record);

        match record.status.event_status() {
            EventStatus::Cancelled => println!(
                "  {} {} {} {}",
                time,
                summary(record).strikethrough(),
                side.dimmed(),
                detail.red()
            ),
            EventStatus::Confirmed => println!(
                "  {} {} {} {}",
                time,
                summary(record),
                side.dimmed(),
                detail.dimmed()
            ),
        }
    }

    Ok(())
}

/// Format a kickoff date as a human-readable label (e.g. "Today", "Tomorrow", "Sat Mar 15")
fn format_date_label(start: DateTime<Utc>, today: NaiveDate) -> String {
    let date = start.with_timezone(&Local).date_naive();

    match (date - today).num_days() {
        -1 => "Yesterday".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

fn side_label(record: &MatchRecord, team_id: u64) -> &'static str {
    if record.is_home_for(team_id) { "Home" } else { "Away" }
}

/// Competition plus the final score or the upstream status
fn match_detail(record: &MatchRecord) -> String {
    let competition = record
        .competition
        .code
        .as_deref()
        .unwrap_or(&record.competition.name);

    match record.final_score() {
        Some((home, away)) => format!("{} {}-{}", competition, home, away),
        None => format!("{} {}", competition, record.status),
    }
}
