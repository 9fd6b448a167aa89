mod common;

use common::{corner_heavy_stats, live, FakeProvider};
use matchpulse::config::SchedulerConfig;
use matchpulse::domain::BetType;
use matchpulse::engine::RecommendationEngine;
use matchpulse::hub::{BroadcastHub, ChannelSubscriber};
use matchpulse::scheduler::{LiveUpdateScheduler, SchedulerPhase};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn scheduler(provider: Arc<FakeProvider>, hub: BroadcastHub) -> LiveUpdateScheduler {
    LiveUpdateScheduler::new(
        provider,
        Arc::new(RecommendationEngine::with_defaults()),
        hub,
        SchedulerConfig::default(),
    )
}

/// Provider data flows through normalization and scoring to every subscriber.
#[tokio::test]
async fn test_cycle_publishes_scored_updates() {
    let provider = Arc::new(
        FakeProvider::default()
            .with_match(live("100", 60), corner_heavy_stats())
            .with_match(live("200", 20), json!({ "corners": { "home": 1, "away": 0 } })),
    );
    let hub = BroadcastHub::with_defaults();
    let (sub, mut rx) = ChannelSubscriber::pair(8);
    hub.register(sub);

    let report = scheduler(provider, hub).run_cycle().await.unwrap();
    assert_eq!(report.matches_seen, 2);
    assert_eq!(report.published, 2);
    assert_eq!(report.failed, 0);

    let first = rx.recv().await.unwrap();
    assert_eq!(first.match_id(), "100");
    assert_eq!(first.stats.corners.total(), 9);
    assert_eq!(
        first.recommendations[0].bet_type,
        BetType::CornerHighActivity
    );
    assert_eq!(first.recommendations[0].threshold_reached, Some(true));

    // Minute 20 is before every gate
    let second = rx.recv().await.unwrap();
    assert_eq!(second.match_id(), "200");
    assert!(second.recommendations.is_empty());
}

/// A match whose stats cannot be fetched is skipped, the rest still go out.
#[tokio::test]
async fn test_missing_stats_skip_only_that_match() {
    let mut provider = FakeProvider::default()
        .with_match(live("1", 60), corner_heavy_stats())
        .with_match(live("3", 60), corner_heavy_stats());
    provider.matches.insert(1, live("2", 60));

    let hub = BroadcastHub::with_defaults();
    let (sub, mut rx) = ChannelSubscriber::pair(8);
    hub.register(sub);

    let report = scheduler(Arc::new(provider), hub).run_cycle().await.unwrap();
    assert_eq!((report.published, report.failed), (2, 1));
    assert_eq!(rx.recv().await.unwrap().match_id(), "1");
    assert_eq!(rx.recv().await.unwrap().match_id(), "3");
}

/// The loop survives a dead provider, stops on request and releases the provider once.
#[tokio::test(start_paused = true)]
async fn test_run_survives_outage_and_stops_cleanly() {
    let provider = Arc::new(FakeProvider {
        listing_down: true,
        ..FakeProvider::default()
    });
    let hub = BroadcastHub::with_defaults();
    let (sub, _rx) = ChannelSubscriber::pair(8);
    let handle = hub.register(sub);

    let sched = Arc::new(scheduler(Arc::clone(&provider), hub.clone()));
    let mut phase = sched.phase();
    let (stop_tx, stop_rx) = watch::channel(false);
    let runner = {
        let sched = Arc::clone(&sched);
        tokio::spawn(async move { sched.run(stop_rx).await })
    };

    // Several backoff rounds pass without the loop exiting
    tokio::time::sleep(Duration::from_secs(21)).await;
    assert!(!runner.is_finished());
    phase
        .wait_for(|p| *p == SchedulerPhase::Sleeping)
        .await
        .unwrap();

    stop_tx.send(true).unwrap();
    runner.await.unwrap();

    assert_eq!(sched.current_phase(), SchedulerPhase::Stopped);
    assert_eq!(provider.shutdown_calls(), 1);
    assert!(hub.is_registered(handle), "subscribers outlive the scheduler");
}

/// Dropping the stop sender also ends the loop.
#[tokio::test(start_paused = true)]
async fn test_dropped_stop_sender_cancels() {
    let provider = Arc::new(FakeProvider::default());
    let sched = scheduler(Arc::clone(&provider), BroadcastHub::with_defaults());
    let (stop_tx, stop_rx) = watch::channel(false);

    let runner = tokio::spawn(async move { sched.run(stop_rx).await });
    tokio::task::yield_now().await;
    drop(stop_tx);

    tokio::time::timeout(Duration::from_secs(60), runner)
        .await
        .expect("scheduler exits")
        .unwrap();
    assert_eq!(provider.shutdown_calls(), 1);
}
