use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use matchcal_core::ics::generate_calendar;
use matchcal_core::{DateRange, MatchCalConfig, MatchRecord, MatchesResponse};
use owo_colors::OwoColorize;
use serde::Deserialize;

use super::write_output;

/// Accepted input shapes: a saved API response or a bare list of matches
#[derive(Deserialize)]
#[serde(untagged)]
enum MatchesFile {
    Response(MatchesResponse),
    List(Vec<MatchRecord>),
}

pub fn run(
    config: &MatchCalConfig,
    input: &Path,
    output: Option<&Path>,
    range: &DateRange,
) -> Result<()> {
    let contents = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let matches = parse_matches(&contents)
        .with_context(|| format!("Failed to parse matches from {}", input.display()))?;
    let matches = within_range(matches, range)?;

    let ics = generate_calendar(&matches, &config.calendar, Utc::now())?;
    write_output(&ics, output)?;

    if let Some(path) = output {
        println!(
            "Rendered {} matches to {}",
            matches.len().to_string().bold(),
            path.display()
        );
    }

    Ok(())
}

fn parse_matches(contents: &str) -> Result<Vec<MatchRecord>> {
    let file: MatchesFile = serde_json::from_str(contents)?;
    Ok(match file {
        MatchesFile::Response(response) => response.matches,
        MatchesFile::List(matches) => matches,
    })
}

/// Keep matches kicking off inside `range`. A bad kickoff time fails the render.
fn within_range(matches: Vec<MatchRecord>, range: &DateRange) -> Result<Vec<MatchRecord>> {
    let mut kept = Vec::with_capacity(matches.len());
    for record in matches {
        if range.contains(record.start()?) {
            kept.push(record);
        }
    }
    Ok(kept)
}
