//! Sofascore public JSON API adapter.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::StatsProvider;
use crate::config::ProviderConfig;
use crate::domain::{LiveMatch, MatchStatus};
use crate::error::{ProviderError, PulseError, Result};
use crate::stats::RawStats;

const REGULATION_MINUTES: u32 = 90;
const MAX_REPORTED_MINUTE: u32 = 130;

#[derive(Clone)]
pub struct SofascoreProvider {
    http: Client,
    base_url: String,
    timeout_ms: u64,
    live_match_limit: usize,
    default_elapsed_minutes: u32,
}

impl SofascoreProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                PulseError::Internal(format!("failed to build Sofascore HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.request_timeout_ms,
            live_match_limit: config.live_match_limit,
            default_elapsed_minutes: config.default_elapsed_minutes,
        })
    }

    async fn get_json(&self, path: &str) -> std::result::Result<Value, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        self.fetch(&url).await.map_err(|err| match ProviderError::from(err) {
            // reqwest does not report the configured limit
            ProviderError::Timeout { .. } => ProviderError::Timeout {
                elapsed_ms: self.timeout_ms,
            },
            other => other,
        })
    }

    async fn fetch(&self, url: &str) -> std::result::Result<Value, reqwest::Error> {
        self.http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}

#[async_trait]
impl StatsProvider for SofascoreProvider {
    fn name(&self) -> &'static str {
        "sofascore"
    }

    async fn list_live_matches(&self) -> std::result::Result<Vec<LiveMatch>, ProviderError> {
        let body = self.get_json("/sport/football/events/live").await?;
        parse_live_events(
            &body,
            self.live_match_limit,
            Utc::now().timestamp(),
            self.default_elapsed_minutes,
        )
    }

    async fn get_match_stats(&self, match_id: &str) -> std::result::Result<RawStats, ProviderError> {
        if match_id.trim().is_empty() {
            return Err(ProviderError::Malformed("empty match id".to_string()));
        }
        self.get_json(&format!("/event/{}/statistics", match_id.trim()))
            .await
    }

    async fn shutdown(&self) {
        info!("Sofascore provider released");
    }
}

/// Map the live events listing onto [`LiveMatch`] values.
pub fn parse_live_events(
    body: &Value,
    limit: usize,
    now_ts: i64,
    default_minutes: u32,
) -> std::result::Result<Vec<LiveMatch>, ProviderError> {
    let events = body
        .get("events")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Malformed("missing `events` array".to_string()))?;

    Ok(events
        .iter()
        .take(limit)
        .map(|event| parse_event(event, now_ts, default_minutes))
        .collect())
}

fn parse_event(event: &Value, now_ts: i64, default_minutes: u32) -> LiveMatch {
    let text = |path: &[&str], fallback: &str| -> String {
        path.iter()
            .try_fold(event, |node, key| node.get(*key))
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };
    let score = |side: &str| -> i64 {
        event
            .get(side)
            .and_then(|s| s.get("current"))
            .and_then(Value::as_i64)
            .unwrap_or(0)
    };

    let id = match event.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    LiveMatch {
        id,
        home_team: text(&["homeTeam", "name"], "Unknown"),
        away_team: text(&["awayTeam", "name"], "Unknown"),
        score: format!("{}-{}", score("homeScore"), score("awayScore")),
        elapsed_minutes: elapsed_minutes(event, now_ts).unwrap_or(default_minutes),
        league: text(&["tournament", "name"], "Unknown League"),
        status: MatchStatus::from_provider(&text(&["status", "type"], "unknown")),
    }
}

/// Match clock from the period start timestamp and which period is running.
fn elapsed_minutes(event: &Value, now_ts: i64) -> Option<u32> {
    let description = event
        .get("status")
        .and_then(|s| s.get("description"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_ascii_lowercase();

    if description.contains("halftime") || description == "ht" {
        return Some(45);
    }

    let time = event.get("time")?;
    let period_start = time.get("currentPeriodStartTimestamp")?.as_i64()?;

    let offset = match time.get("initial").and_then(Value::as_u64) {
        Some(initial_secs) => u32::try_from(initial_secs / 60).unwrap_or(MAX_REPORTED_MINUTE),
        None if description.contains("2nd extra") => 105,
        None if description.contains("1st extra") || description.contains("extra") => {
            REGULATION_MINUTES
        }
        None if description.contains("2nd") => 45,
        None => 0,
    };

    let into_period = now_ts.saturating_sub(period_start).max(0) / 60;
    let into_period = u32::try_from(into_period).unwrap_or(MAX_REPORTED_MINUTE);
    Some(offset.saturating_add(into_period).min(MAX_REPORTED_MINUTE))
}
