use std::sync::Arc;

use anyhow::Result;
use matchcal_core::{CalendarConfig, MatchCalConfig, MatchSource};
use matchcal_core::config::ServerConfig;
use matchcal_provider_football_data::FootballDataClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Matches are fetched on every request; HTTP caching headers are the only cache
    source: Arc<dyn MatchSource>,
    config: Arc<MatchCalConfig>,
}

impl AppState {
    pub fn new(config: MatchCalConfig) -> Result<Self> {
        let client = FootballDataClient::new(&config.source, config.calendar.team_id)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    pub fn with_source(config: MatchCalConfig, source: Arc<dyn MatchSource>) -> Self {
        AppState {
            source,
            config: Arc::new(config),
        }
    }

    pub fn source(&self) -> &dyn MatchSource {
        self.source.as_ref()
    }

    pub fn config(&self) -> &MatchCalConfig {
        &self.config
    }

    pub fn calendar(&self) -> &CalendarConfig {
        &self.config.calendar
    }

    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }
}
