use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use matchcal_core::ics::generate_calendar;
use matchcal_core::{DateRange, MatchCalConfig};
use owo_colors::OwoColorize;

use super::{fetch_matches, write_output};

pub async fn run(config: &MatchCalConfig, range: DateRange, output: Option<&Path>) -> Result<()> {
    let matches = fetch_matches(config, &range).await?;
    let ics = generate_calendar(&matches, &config.calendar, Utc::now())?;

    write_output(&ics, output)?;
    tracing::debug!(matches = matches.len(), bytes = ics.len(), "exported calendar");

    if let Some(path) = output {
        println!(
            "Wrote {} matches to {}",
            matches.len().to_string().bold(),
            path.display()
        );
    }

    Ok(())
}
