use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::warn;

use crate::api::{
    query::{self, DEFAULT_TIME_ELAPSED},
    state::AppState,
    types::*,
};

/// GET /
pub async fn root() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        message: "Matchpulse live stats API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
    })
}

/// GET /api/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let hub = state.hub.stats();
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        active_connections: hub.subscribers,
        scheduler_phase: state.scheduler_phase(),
        uptime_secs: state.uptime_seconds(),
        delivered: hub.delivered,
        dropped: hub.dropped,
    })
}

/// GET /api/live-matches
pub async fn get_live_matches(
    State(state): State<AppState>,
) -> (StatusCode, Json<LiveMatchesResponse>) {
    match query::live_matches(state.provider.as_ref()).await {
        Ok(resp) => (StatusCode::OK, Json(resp)),
        Err(e) => {
            warn!("Live match listing failed: {}", e);
            (e.status_code(), Json(LiveMatchesResponse::failed(&e)))
        }
    }
}

/// GET /api/match/:id/stats
pub async fn get_match_stats(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> (StatusCode, Json<MatchStatsResponse>) {
    match query::match_stats(state.provider.as_ref(), Some(&match_id)).await {
        Ok(resp) => (StatusCode::OK, Json(resp)),
        Err(e) => {
            warn!("Stats lookup for match {} failed: {}", match_id, e);
            (e.status_code(), Json(MatchStatsResponse::failed(&e)))
        }
    }
}

/// GET /api/match/:id/analysis?time_elapsed=N
pub async fn get_match_analysis(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Query(params): Query<ElapsedQuery>,
) -> (StatusCode, Json<AnalysisResponse>) {
    analysis(
        &state,
        Some(&match_id),
        params.time_elapsed.unwrap_or(DEFAULT_TIME_ELAPSED),
    )
    .await
}

/// GET /api/analysis?match_id=..&time_elapsed=..
pub async fn get_analysis(
    State(state): State<AppState>,
    Query(params): Query<AnalysisQuery>,
) -> (StatusCode, Json<AnalysisResponse>) {
    analysis(
        &state,
        params.match_id.as_deref(),
        params.time_elapsed.unwrap_or(DEFAULT_TIME_ELAPSED),
    )
    .await
}

async fn analysis(
    state: &AppState,
    match_id: Option<&str>,
    minutes: u32,
) -> (StatusCode, Json<AnalysisResponse>) {
    match query::analyze_match(state.provider.as_ref(), &state.engine, match_id, minutes).await {
        Ok(resp) => (StatusCode::OK, Json(resp)),
        Err(e) => {
            warn!("Analysis failed: {}", e);
            (e.status_code(), Json(AnalysisResponse::failed(&e)))
        }
    }
}
