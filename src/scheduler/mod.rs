//! Polling loop: provider -> normalizer -> engine -> hub.

pub mod phase;

pub use phase::SchedulerPhase;

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::SchedulerConfig;
use crate::domain::{LiveMatch, Update};
use crate::engine::RecommendationEngine;
use crate::error::{ProviderError, Result};
use crate::hub::BroadcastHub;
use crate::provider::StatsProvider;
use crate::stats;

/// Outcome of one polling cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    /// Matches taken from the live listing after the per-cycle cap
    pub matches_seen: usize,
    pub published: usize,
    pub failed: usize,
}

pub struct LiveUpdateScheduler {
    provider: Arc<dyn StatsProvider>,
    engine: Arc<RecommendationEngine>,
    hub: BroadcastHub,
    config: SchedulerConfig,
    phase_tx: watch::Sender<SchedulerPhase>,
}

impl LiveUpdateScheduler {
    pub fn new(
        provider: Arc<dyn StatsProvider>,
        engine: Arc<RecommendationEngine>,
        hub: BroadcastHub,
        config: SchedulerConfig,
    ) -> Self {
        let (phase_tx, _) = watch::channel(SchedulerPhase::Idle);
        Self {
            provider,
            engine,
            hub,
            config,
            phase_tx,
        }
    }

    /// Subscribe to phase changes
    pub fn phase(&self) -> watch::Receiver<SchedulerPhase> {
        self.phase_tx.subscribe()
    }

    pub fn current_phase(&self) -> SchedulerPhase {
        *self.phase_tx.borrow()
    }

    fn set_phase(&self, next: SchedulerPhase) {
        let prev = self.phase_tx.send_replace(next);
        if prev != next && !prev.can_transition_to(next) {
            warn!("Unexpected scheduler transition {} -> {}", prev, next);
        }
    }

    /// Run a single cycle without a cancellation source.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let (_tx, never) = watch::channel(false);
        self.cycle(&never).await
    }

    async fn cycle(&self, shutdown: &watch::Receiver<bool>) -> Result<CycleReport> {
        self.set_phase(SchedulerPhase::Fetching);
        let mut matches = self.provider.list_live_matches().await?;
        matches.truncate(self.config.max_matches_per_cycle);

        let mut report = CycleReport {
            matches_seen: matches.len(),
            ..CycleReport::default()
        };

        for live_match in matches {
            if *shutdown.borrow() {
                debug!("Cancellation observed mid-cycle");
                break;
            }

            let label = live_match.label();
            let match_id = live_match.id.clone();
            match self.build_update(live_match).await {
                Ok(update) => {
                    self.set_phase(SchedulerPhase::Publishing);
                    let receivers = self.hub.publish(update);
                    debug!("Match {} ({}) sent to {} subscribers", match_id, label, receivers);
                    report.published += 1;
                }
                Err(e) => {
                    warn!("Skipping match {} ({}): {}", match_id, label, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    async fn build_update(&self, live_match: LiveMatch) -> std::result::Result<Update, ProviderError> {
        self.set_phase(SchedulerPhase::Fetching);
        let raw = self.provider.get_match_stats(&live_match.id).await?;

        self.set_phase(SchedulerPhase::Normalizing);
        let stats = stats::normalize(&raw);

        self.set_phase(SchedulerPhase::Scoring);
        let recommendations = self.engine.analyze(&stats, live_match.elapsed_minutes);

        Ok(Update::new(live_match, stats, &recommendations))
    }

    /// Poll until `shutdown` flips to true (or its sender is dropped).
    ///
    /// Cancellation is observed before every fetch, between matches and during
    /// every sleep. The provider is shut down on exit; the hub is left as is.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Live update scheduler started (provider: {}, every {:?})",
            self.provider.name(),
            self.config.poll_interval()
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let delay = match self.cycle(&shutdown).await {
                Ok(report) => {
                    info!(
                        "Cycle complete: {} matches, {} published, {} failed",
                        report.matches_seen, report.published, report.failed
                    );
                    self.config.poll_interval()
                }
                Err(e) => {
                    error!("Live update cycle failed: {}", e);
                    self.config.error_backoff()
                }
            };

            if *shutdown.borrow() {
                break;
            }

            self.set_phase(SchedulerPhase::Sleeping);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancelled(&mut shutdown) => break,
            }
        }

        self.provider.shutdown().await;
        self.set_phase(SchedulerPhase::Stopped);
        info!("Live update scheduler stopped");
    }
}

/// Resolves once the flag is set or the sender is gone
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}
