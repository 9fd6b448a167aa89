use matchpulse::api::{create_router, AppState};
use matchpulse::config::{AppConfig, LoggingConfig};
use matchpulse::engine::RecommendationEngine;
use matchpulse::error::Result;
use matchpulse::hub::BroadcastHub;
use matchpulse::provider::{SofascoreProvider, StatsProvider};
use matchpulse::scheduler::LiveUpdateScheduler;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},matchpulse=debug", config.level))
    });

    // `rolling::daily` panics if the first file cannot be created, so probe first
    let file_layer = config.dir.as_deref().and_then(|log_dir| {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!(
                "Warning: Could not create log directory {} ({}), file logging disabled",
                log_dir, e
            );
            return None;
        }
        let probe = std::path::Path::new(log_dir).join(".matchpulse_write_test");
        if let Err(e) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&probe)
        {
            eprintln!(
                "Warning: Could not write to log directory {} ({}), file logging disabled",
                log_dir, e
            );
            return None;
        }
        let _ = std::fs::remove_file(&probe);

        let file_appender = tracing_appender::rolling::daily(log_dir, "matchpulse.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Process-lifetime writer
        Box::leak(Box::new(guard));

        eprintln!("Logging to: {}/matchpulse.log", log_dir);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
    });

    let (plain, json) = if config.json {
        (None, Some(tracing_subscriber::fmt::layer().json().with_target(true)))
    } else {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            ),
            None,
        )
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .with(file_layer)
        .try_init();
}

pub fn init_logging_simple() {
    // Minimal logging for one-shot commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn StatsProvider>> {
    Ok(Arc::new(SofascoreProvider::new(&config.provider)?))
}

/// Scheduler plus HTTP/WebSocket server until Ctrl+C
pub async fn run_serve_mode(config: AppConfig, bind: Option<String>) -> Result<()> {
    let provider = build_provider(&config)?;
    let engine = Arc::new(RecommendationEngine::new(config.engine.clone()));
    let hub = BroadcastHub::new(&config.hub);

    let scheduler = Arc::new(LiveUpdateScheduler::new(
        Arc::clone(&provider),
        Arc::clone(&engine),
        hub.clone(),
        config.scheduler.clone(),
    ));
    let state = AppState::new(provider, engine, hub.clone(), scheduler.phase());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_task = {
        let scheduler = Arc::clone(&scheduler);
        tokio::spawn(async move { scheduler.run(shutdown_rx).await })
    };

    let bind_addr = bind.unwrap_or(config.api.bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);

    let mut server_shutdown = shutdown_tx.subscribe();
    let server = axum::serve(listener, create_router(state)).with_graceful_shutdown(async move {
        let _ = server_shutdown.wait_for(|stop| *stop).await;
    });

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    let server_task = tokio::spawn(async move { server.await });

    ctrl_c.await;
    info!("Shutdown requested");
    let _ = shutdown_tx.send(true);

    if let Err(e) = scheduler_task.await {
        error!("Scheduler task failed: {}", e);
    }
    match server_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("HTTP server error: {}", e),
        Err(e) => error!("HTTP server task failed: {}", e),
    }

    let stats = hub.stats();
    info!(
        "Stopped ({} subscribers connected, {} delivered, {} dropped)",
        stats.subscribers, stats.delivered, stats.dropped
    );
    Ok(())
}
