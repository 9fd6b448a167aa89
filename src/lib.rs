pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod hub;
pub mod provider;
pub mod scheduler;
pub mod stats;

pub use config::AppConfig;
pub use domain::{
    BetType, Confidence, LiveMatch, MatchStats, MatchStatus, Recommendation, StatPair, Update,
};
pub use engine::{RecommendationEngine, StrategyConfig};
pub use error::{ProviderError, PulseError, Result};
pub use hub::{BroadcastHub, Subscriber, SubscriberHandle};
pub use provider::{SofascoreProvider, StatsProvider};
pub use scheduler::{CycleReport, LiveUpdateScheduler, SchedulerPhase};
pub use stats::normalize;
