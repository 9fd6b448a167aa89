//! Request/response lookups shared by the HTTP handlers and the CLI.

use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;

use crate::api::types::{AnalysisResponse, LiveMatchesResponse, MatchStatsResponse};
use crate::engine::RecommendationEngine;
use crate::error::ProviderError;
use crate::provider::StatsProvider;
use crate::stats;

/// Match clock assumed when the caller does not pass `time_elapsed`
pub const DEFAULT_TIME_ELAPSED: u32 = 60;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Match ID required")]
    MissingMatchId,

    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl QueryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::MissingMatchId => StatusCode::BAD_REQUEST,
            QueryError::Provider(ProviderError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            QueryError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

fn require_match_id(match_id: Option<&str>) -> Result<&str, QueryError> {
    match match_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(QueryError::MissingMatchId),
    }
}

pub async fn live_matches(provider: &dyn StatsProvider) -> Result<LiveMatchesResponse, QueryError> {
    let matches = provider.list_live_matches().await?;
    Ok(LiveMatchesResponse::ok(matches))
}

pub async fn match_stats(
    provider: &dyn StatsProvider,
    match_id: Option<&str>,
) -> Result<MatchStatsResponse, QueryError> {
    let match_id = require_match_id(match_id)?;
    let raw = provider.get_match_stats(match_id).await?;
    Ok(MatchStatsResponse::ok(match_id, stats::normalize(&raw)))
}

/// Fetch, normalize and score one match at the given minute.
pub async fn analyze_match(
    provider: &dyn StatsProvider,
    engine: &RecommendationEngine,
    match_id: Option<&str>,
    minutes: u32,
) -> Result<AnalysisResponse, QueryError> {
    let match_id = require_match_id(match_id)?;
    let raw = provider.get_match_stats(match_id).await?;
    let stats = stats::normalize(&raw);
    let recommendations = engine.analyze(&stats, minutes);

    Ok(AnalysisResponse {
        success: true,
        match_id: Some(match_id.to_string()),
        time_elapsed: Some(minutes),
        recommendations: recommendations.iter().map(|r| r.to_view()).collect(),
        stats: Some(stats),
        timestamp: Some(Utc::now()),
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockStatsProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_match_id() {
        let mut provider = MockStatsProvider::new();
        provider.expect_get_match_stats().never();
        let engine = RecommendationEngine::with_defaults();

        for id in [None, Some(""), Some("   ")] {
            let err = analyze_match(&provider, &engine, id, 60).await.unwrap_err();
            assert!(matches!(err, QueryError::MissingMatchId));
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

            let body = serde_json::to_value(AnalysisResponse::failed(&err)).unwrap();
            assert_eq!(body["success"], json!(false));
            assert_eq!(body["error"], json!("Match ID required"));
            assert_eq!(body["recommendations"], json!([]));
        }
    }

    #[tokio::test]
    async fn test_analysis_shape() {
        let mut provider = MockStatsProvider::new();
        provider
            .expect_get_match_stats()
            .withf(|id| id == "12345")
            .returning(|_| {
                Ok(json!({
                    "corners": {"home": 5, "away": 4},
                    "shots": {"home": 10, "away": 9}
                }))
            });
        let engine = RecommendationEngine::with_defaults();

        let resp = analyze_match(&provider, &engine, Some(" 12345 "), 60)
            .await
            .unwrap();
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["matchId"], json!("12345"));
        assert_eq!(body["timeElapsed"], json!(60));
        assert_eq!(body["stats"]["corners"]["home"], json!(5));
        assert_eq!(body["recommendations"][0]["betType"], json!("CORNER_HIGH_ACTIVITY"));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_gateway() {
        let mut provider = MockStatsProvider::new();
        provider
            .expect_list_live_matches()
            .returning(|| Err(ProviderError::Status { code: 403 }));

        let err = live_matches(&provider).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(!LiveMatchesResponse::failed(&err).success);
    }
}
