pub mod config;
pub mod export;
pub mod list;
pub mod render;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use matchcal_core::{DateRange, MatchCalConfig, MatchRecord, MatchSource};
use matchcal_provider_football_data::FootballDataClient;

use crate::utils::tui::create_spinner;

/// Fetch the configured team's matches, showing a spinner meanwhile.
pub async fn fetch_matches(config: &MatchCalConfig, range: &DateRange) -> Result<Vec<MatchRecord>> {
    let client = FootballDataClient::new(&config.source, config.calendar.team_id)?;

    let spinner = create_spinner(format!(
        "Fetching matches for team {} ({} → {})",
        client.team_id(),
        range.from_param(),
        range.to_param()
    ));
    let result = client.fetch_matches(range).await;
    spinner.finish_and_clear();

    Ok(result?)
}

/// Write `contents` to `output`, or to stdout when no path is given.
pub fn write_output(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}
