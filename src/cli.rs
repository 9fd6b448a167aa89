use clap::{Parser, Subcommand};

use crate::api::query::{self, DEFAULT_TIME_ELAPSED};
use crate::api::types::{AnalysisResponse, LiveMatchesResponse};
use crate::engine::RecommendationEngine;
use crate::error::Result;
use crate::provider::StatsProvider;

#[derive(Parser)]
#[command(name = "matchpulse")]
#[command(version)]
#[command(about = "Live football stats, in-play recommendations and a WebSocket feed", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding default.toml and environment overrides
    #[arg(short, long, default_value = "config", env = "MATCHPULSE_CONFIG_DIR")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the polling scheduler and the HTTP/WebSocket server (default)
    Serve {
        /// Override api.bind_addr
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Print the current live matches once
    Matches,
    /// Fetch, normalize and score one match, then print the analysis
    Analyze {
        /// Provider match id
        match_id: String,
        /// Elapsed minutes to score at
        #[arg(short, long, default_value_t = DEFAULT_TIME_ELAPSED)]
        minutes: u32,
    },
}

pub async fn print_live_matches(provider: &dyn StatsProvider) -> Result<()> {
    let resp = match query::live_matches(provider).await {
        Ok(resp) => resp,
        Err(e) => LiveMatchesResponse::failed(&e),
    };

    if !resp.success {
        println!("\x1b[31m✗ {}\x1b[0m", resp.error.unwrap_or_default());
        return Ok(());
    }

    println!("{} live matches", resp.count);
    for m in &resp.matches {
        println!(
            "  {:>10}  {:<40} {:>5}  {:>3}'  {}",
            m.id,
            m.label(),
            m.score,
            m.elapsed_minutes,
            m.league
        );
    }
    Ok(())
}

pub async fn print_analysis(
    provider: &dyn StatsProvider,
    engine: &RecommendationEngine,
    match_id: &str,
    minutes: u32,
) -> Result<()> {
    let resp = match query::analyze_match(provider, engine, Some(match_id), minutes).await {
        Ok(resp) => resp,
        Err(e) => AnalysisResponse::failed(&e),
    };
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}
