use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LiveMatch, MatchStats, RecommendationView};
use crate::scheduler::SchedulerPhase;

// ============================================================================
// Service Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub active_connections: usize,
    pub scheduler_phase: SchedulerPhase,
    pub uptime_secs: i64,
    pub delivered: u64,
    pub dropped: u64,
}

// ============================================================================
// Match Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatchesResponse {
    pub success: bool,
    pub count: usize,
    pub matches: Vec<LiveMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LiveMatchesResponse {
    pub fn ok(matches: Vec<LiveMatch>) -> Self {
        Self {
            success: true,
            count: matches.len(),
            matches,
            timestamp: Some(Utc::now()),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            count: 0,
            matches: Vec::new(),
            timestamp: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    pub stats: Option<MatchStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchStatsResponse {
    pub fn ok(match_id: &str, stats: MatchStats) -> Self {
        Self {
            success: true,
            match_id: Some(match_id.to_string()),
            stats: Some(stats),
            timestamp: Some(Utc::now()),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            match_id: None,
            stats: None,
            timestamp: None,
            error: Some(error.to_string()),
        }
    }
}

// ============================================================================
// Analysis Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<u32>,
    pub recommendations: Vec<RecommendationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<MatchStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            match_id: None,
            time_elapsed: None,
            recommendations: Vec::new(),
            stats: None,
            timestamp: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    pub match_id: Option<String>,
    pub time_elapsed: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ElapsedQuery {
    pub time_elapsed: Option<u32>,
}
