#![allow(dead_code)]

use async_trait::async_trait;
use matchpulse::domain::{LiveMatch, MatchStatus};
use matchpulse::error::ProviderError;
use matchpulse::provider::StatsProvider;
use matchpulse::stats::RawStats;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory provider with canned listings and per-match stats
#[derive(Default)]
pub struct FakeProvider {
    pub matches: Vec<LiveMatch>,
    pub stats: HashMap<String, Value>,
    pub listing_down: bool,
    pub shutdowns: AtomicUsize,
}

impl FakeProvider {
    pub fn with_match(mut self, live_match: LiveMatch, raw: Value) -> Self {
        self.stats.insert(live_match.id.clone(), raw);
        self.matches.push(live_match);
        self
    }

    pub fn shutdown_calls(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn list_live_matches(&self) -> Result<Vec<LiveMatch>, ProviderError> {
        if self.listing_down {
            return Err(ProviderError::Unreachable("connection refused".to_string()));
        }
        Ok(self.matches.clone())
    }

    async fn get_match_stats(&self, match_id: &str) -> Result<RawStats, ProviderError> {
        self.stats
            .get(match_id)
            .cloned()
            .ok_or(ProviderError::Status { code: 404 })
    }

    async fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn live(id: &str, minutes: u32) -> LiveMatch {
    LiveMatch {
        id: id.to_string(),
        home_team: "Lyon".to_string(),
        away_team: "Marseille".to_string(),
        score: "1-1".to_string(),
        elapsed_minutes: minutes,
        league: "Ligue 1".to_string(),
        status: MatchStatus::Live,
    }
}

/// Grouped provider record with enough activity to trigger corners at 60'
pub fn corner_heavy_stats() -> Value {
    json!({
        "statistics": [{
            "period": "ALL",
            "groups": [{
                "groupName": "Match overview",
                "statisticsItems": [
                    { "name": "Ball possession", "home": "51%", "away": "49%" },
                    { "name": "Corner kicks", "home": 5, "away": 4 },
                    { "name": "Total shots", "home": 10, "away": 9 },
                    { "name": "Shots on target", "home": 3, "away": 3 }
                ]
            }]
        }]
    })
}
