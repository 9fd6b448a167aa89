pub mod config;
pub mod scorecard;
pub mod strategies;

pub use config::{
    BttsConfig, CardConfig, ConfidenceScale, CornerConfig, EmitGate, GoalConfig, StrategyConfig,
};
pub use scorecard::Scorecard;
pub use strategies::{
    BothTeamsScore, CardPrediction, CornerActivity, GoalImminent, ScoringStrategy,
};

use tracing::debug;

use crate::domain::{MatchStats, Recommendation};

/// Runs every scoring strategy against one stats snapshot
pub struct RecommendationEngine {
    scale: ConfidenceScale,
    strategies: Vec<Box<dyn ScoringStrategy>>,
}

impl RecommendationEngine {
    pub fn new(config: StrategyConfig) -> Self {
        let strategies: Vec<Box<dyn ScoringStrategy>> = vec![
            Box::new(CornerActivity::new(config.corners)),
            Box::new(CardPrediction::new(config.cards)),
            Box::new(GoalImminent::new(config.goals)),
            Box::new(BothTeamsScore::new(config.btts)),
        ];
        Self {
            scale: config.confidence,
            strategies,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(StrategyConfig::default())
    }

    pub fn confidence_scale(&self) -> &ConfidenceScale {
        &self.scale
    }

    /// Evaluate all strategies and rank the triggered ones by probability,
    /// highest first. Equal probabilities keep strategy order.
    pub fn analyze(&self, stats: &MatchStats, minutes: u32) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = self
            .strategies
            .iter()
            .filter_map(|strategy| {
                let rec = strategy.evaluate(stats, minutes, &self.scale);
                if rec.is_none() {
                    debug!("{} did not trigger at minute {}", strategy.bet_type(), minutes);
                }
                rec
            })
            .collect();

        // Vec::sort_by is stable
        recommendations.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        recommendations
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
