use clap::Parser;
use matchpulse::cli::{self, Cli, Commands};
use matchpulse::config::AppConfig;
use matchpulse::engine::RecommendationEngine;
use matchpulse::error::Result;
use matchpulse::provider::StatsProvider;

mod main_runtime;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_from(&cli.config)?;

    match cli.command {
        Some(Commands::Matches) => {
            main_runtime::init_logging_simple();
            let provider = main_runtime::build_provider(&config)?;
            cli::print_live_matches(provider.as_ref()).await?;
            provider.shutdown().await;
        }
        Some(Commands::Analyze { match_id, minutes }) => {
            main_runtime::init_logging_simple();
            let provider = main_runtime::build_provider(&config)?;
            let engine = RecommendationEngine::new(config.engine.clone());
            cli::print_analysis(provider.as_ref(), &engine, &match_id, minutes).await?;
            provider.shutdown().await;
        }
        Some(Commands::Serve { bind }) => {
            main_runtime::init_logging(&config.logging);
            main_runtime::run_serve_mode(config, bind).await?;
        }
        None => {
            main_runtime::init_logging(&config.logging);
            main_runtime::run_serve_mode(config, None).await?;
        }
    }

    Ok(())
}
