//! HTTP client for the football-data.org v4 API

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use matchcal_core::config::SourceConfig;
use matchcal_core::{DateRange, MatchCalError, MatchCalResult, MatchRecord, MatchSource, MatchesResponse};

const AUTH_HEADER: &str = "X-Auth-Token";

/// Client for `/teams/{id}/matches`
pub struct FootballDataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    team_id: u64,
    status_filter: String,
    timeout: Duration,
}

/// Error body returned by the API on 4xx responses
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl FootballDataClient {
    /// Build a client from the `[source]` settings. Fails when no API key is available.
    pub fn new(source: &SourceConfig, team_id: u64) -> MatchCalResult<Self> {
        let api_key = source.resolve_api_key()?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: source.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            team_id,
            status_filter: source.status_filter(),
            timeout: Duration::from_secs(source.timeout_secs),
        })
    }

    pub fn team_id(&self) -> u64 {
        self.team_id
    }

    /// Request URL for `range`, including the status filter.
    pub fn matches_url(&self, range: &DateRange) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/teams/{}/matches", self.base_url, self.team_id))
            .with_context(|| format!("Invalid API base URL: {}", self.base_url))?;

        url.query_pairs_mut()
            .append_pair("status", &self.status_filter)
            .append_pair("dateFrom", &range.from_param())
            .append_pair("dateTo", &range.to_param());

        Ok(url)
    }

    /// GET /teams/{id}/matches
    pub async fn list_matches(&self, range: &DateRange) -> Result<Vec<MatchRecord>> {
        let url = self.matches_url(range)?;
        tracing::info!(team_id = self.team_id, from = %range.from, to = %range.to, "fetching matches");

        let resp = self
            .http
            .get(url)
            .header(AUTH_HEADER, &self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to connect to football-data.org")?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);

            match message {
                Some(message) => anyhow::bail!("football-data.org API error: {}: {}", status, message),
                None => anyhow::bail!("football-data.org API error: {}", status),
            }
        }

        let body: MatchesResponse = resp
            .json()
            .await
            .context("Failed to decode football-data.org response")?;

        tracing::info!(team_id = self.team_id, count = body.matches.len(), "fetched matches");
        Ok(body.matches)
    }
}

#[async_trait]
impl MatchSource for FootballDataClient {
    async fn fetch_matches(&self, range: &DateRange) -> MatchCalResult<Vec<MatchRecord>> {
        self.list_matches(range)
            .await
            .map_err(|e| MatchCalError::Provider(format!("{:#}", e)))
    }
}
