//! Global matchcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::CalendarConfig;
use crate::error::{MatchCalError, MatchCalResult};
use crate::fixture::MatchStatus;

/// Environment variable consulted when `source.api_key` is not set.
pub const API_KEY_ENV: &str = "FOOTBALL_DATA_API_KEY";

const ENV_PREFIX: &str = "MATCHCAL";

/// Longest lookback or lookforward window, in days.
const MAX_WINDOW_DAYS: u32 = 3660;

/// Paths the feed server claims for itself.
const RESERVED_FILE_NAMES: &[&str] = &["health"];

fn default_api_base_url() -> String {
    "https://api.football-data.org/v4".to_string()
}

fn default_lookback_days() -> u32 {
    7
}

fn default_lookforward_days() -> u32 {
    60
}

fn default_statuses() -> Vec<MatchStatus> {
    vec![
        MatchStatus::Scheduled,
        MatchStatus::Timed,
        MatchStatus::Live,
        MatchStatus::InPlay,
        MatchStatus::Paused,
        MatchStatus::Finished,
    ]
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_bind_addr() -> String {
    "127.0.0.1:4096".to_string()
}

fn default_file_name() -> String {
    "calendar.ics".to_string()
}

fn default_cache_max_age_secs() -> u64 {
    3600
}

fn default_stale_while_revalidate_secs() -> u64 {
    1800
}

/// Global configuration at ~/.config/matchcal/config.toml, overridable with
/// `MATCHCAL__<SECTION>__<KEY>` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchCalConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Where fixtures come from (`[source]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Days before today to include (recent results).
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Days after today to include (upcoming fixtures).
    #[serde(default = "default_lookforward_days")]
    pub lookforward_days: u32,

    #[serde(default = "default_statuses")]
    pub statuses: Vec<MatchStatus>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            api_base_url: default_api_base_url(),
            api_key: None,
            lookback_days: default_lookback_days(),
            lookforward_days: default_lookforward_days(),
            statuses: default_statuses(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> MatchCalResult<()> {
        for (key, days) in [
            ("lookback_days", self.lookback_days),
            ("lookforward_days", self.lookforward_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(MatchCalError::Config(format!(
                    "source.{} must be at most {} (got {})",
                    key, MAX_WINDOW_DAYS, days
                )));
            }
        }
        if self.statuses.is_empty() {
            return Err(MatchCalError::Config(
                "source.statuses must list at least one status".into(),
            ));
        }
        Ok(())
    }

    /// API key from config, falling back to `FOOTBALL_DATA_API_KEY`.
    pub fn resolve_api_key(&self) -> MatchCalResult<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Ok(key.clone());
        }

        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(MatchCalError::Config(format!(
                "{} environment variable is not set (or set source.api_key in config.toml)",
                API_KEY_ENV
            ))),
        }
    }

    /// Comma-separated status filter as the upstream API expects it.
    pub fn status_filter(&self) -> String {
        self.statuses
            .iter()
            .map(|s| s.as_api_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Feed server settings (`[server]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Name the feed is served under, e.g. `/calendar.ics`.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,

    #[serde(default = "default_stale_while_revalidate_secs")]
    pub stale_while_revalidate_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: default_bind_addr(),
            file_name: default_file_name(),
            cache_max_age_secs: default_cache_max_age_secs(),
            stale_while_revalidate_secs: default_stale_while_revalidate_secs(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> MatchCalResult<()> {
        let name = self.file_name.trim_start_matches('/');
        if name.is_empty() || name.contains('/') {
            return Err(MatchCalError::Config(format!(
                "server.file_name '{}' must be a single path segment",
                self.file_name
            )));
        }
        if RESERVED_FILE_NAMES.contains(&name) {
            return Err(MatchCalError::Config(format!(
                "server.file_name '{}' is reserved",
                self.file_name
            )));
        }
        Ok(())
    }

    pub fn cache_control(&self) -> String {
        format!(
            "public, max-age={max}, s-maxage={max}, stale-while-revalidate={swr}",
            max = self.cache_max_age_secs,
            swr = self.stale_while_revalidate_secs
        )
    }
}

impl MatchCalConfig {
    pub fn config_path() -> MatchCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MatchCalError::Config("Could not determine config directory".into()))?
            .join("matchcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path plus environment overrides.
    pub fn load() -> MatchCalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (optional on disk) plus environment overrides.
    pub fn load_from(path: &Path) -> MatchCalResult<Self> {
        Self::load_layered(path, environment())
    }

    fn load_layered(path: &Path, env: Environment) -> MatchCalResult<Self> {
        let config: MatchCalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| MatchCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MatchCalError::Config(e.to_string()))?;

        config.validate()?;
        tracing::debug!(path = %path.display(), team_id = config.calendar.team_id, "loaded config");

        Ok(config)
    }

    pub fn validate(&self) -> MatchCalResult<()> {
        self.calendar.validate()?;
        self.source.validate()?;
        self.server.validate()
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MatchCalResult<()> {
        let calendar = CalendarConfig::default();
        let source = SourceConfig::default();
        let server = ServerConfig::default();

        let contents = format!(
            "\
# matchcal configuration

[calendar]
# Team the calendar follows (football-data.org team id):
# team_id = {team_id}
# team_name = \"{team_name}\"
# calendar_name = \"{calendar_name}\"
# calendar_domain = \"{calendar_domain}\"
# product_name = \"{product_name}\"
# alarm_minutes_before = {alarm}
# match_duration_minutes = {duration}

[source]
# api_base_url = \"{api_base_url}\"
# API key (defaults to the {api_key_env} environment variable):
# api_key = \"...\"
# lookback_days = {lookback}
# lookforward_days = {lookforward}
# statuses = [{statuses}]

[server]
# bind_addr = \"{bind_addr}\"
# file_name = \"{file_name}\"
# cache_max_age_secs = {max_age}
# stale_while_revalidate_secs = {swr}
",
            team_id = calendar.team_id,
            team_name = calendar.team_name,
            calendar_name = calendar.calendar_name,
            calendar_domain = calendar.calendar_domain,
            product_name = calendar.product_name,
            alarm = calendar.alarm_minutes_before,
            duration = calendar.match_duration_minutes,
            api_base_url = source.api_base_url,
            api_key_env = API_KEY_ENV,
            lookback = source.lookback_days,
            lookforward = source.lookforward_days,
            statuses = source
                .statuses
                .iter()
                .map(|s| format!("\"{}\"", s.as_api_str()))
                .collect::<Vec<_>>()
                .join(", "),
            bind_addr = server.bind_addr,
            file_name = server.file_name,
            max_age = server.cache_max_age_secs,
            swr = server.stale_while_revalidate_secs,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Serialize the effective configuration (API key omitted).
    pub fn to_toml(&self) -> MatchCalResult<String> {
        let mut redacted = self.clone();
        redacted.source.api_key = None;
        toml::to_string_pretty(&redacted).map_err(|e| MatchCalError::Serialization(e.to_string()))
    }
}

/// `MATCHCAL__SECTION__KEY` overrides; `source.statuses` takes a comma list.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("source.statuses")
}
