//! Configuration types for matchcal.

mod calendar_config;
mod matchcal_config;

pub use calendar_config::CalendarConfig;
pub use matchcal_config::{API_KEY_ENV, MatchCalConfig, ServerConfig, SourceConfig};
