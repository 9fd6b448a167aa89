use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

use crate::engine::RecommendationEngine;
use crate::hub::BroadcastHub;
use crate::provider::StatsProvider;
use crate::scheduler::SchedulerPhase;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Source for on-demand lookups; the same instance the scheduler polls
    pub provider: Arc<dyn StatsProvider>,

    pub engine: Arc<RecommendationEngine>,

    /// Live subscriber set; WebSocket clients register here
    pub hub: BroadcastHub,

    /// Latest scheduler phase
    pub phase: watch::Receiver<SchedulerPhase>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn StatsProvider>,
        engine: Arc<RecommendationEngine>,
        hub: BroadcastHub,
        phase: watch::Receiver<SchedulerPhase>,
    ) -> Self {
        Self {
            provider,
            engine,
            hub,
            phase,
            start_time: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }

    pub fn scheduler_phase(&self) -> SchedulerPhase {
        *self.phase.borrow()
    }
}
