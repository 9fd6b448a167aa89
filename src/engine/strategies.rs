//! The four fixed scoring strategies.
//!
//! All share one shape: a minute gate, a base probability, an ordered list of
//! independent signal checks, a per-strategy cap and a tier lookup.

use super::config::{BttsConfig, CardConfig, ConfidenceScale, CornerConfig, GoalConfig};
use super::scorecard::{rate_per_10, Scorecard};
use crate::domain::{BetType, MatchStats, Recommendation};

/// One independent scoring rule, producing at most one recommendation per cycle
pub trait ScoringStrategy: Send + Sync {
    fn bet_type(&self) -> BetType;

    fn evaluate(
        &self,
        stats: &MatchStats,
        minutes: u32,
        scale: &ConfidenceScale,
    ) -> Option<Recommendation>;
}

#[derive(Debug, Clone)]
pub struct CornerActivity {
    config: CornerConfig,
}

impl CornerActivity {
    pub fn new(config: CornerConfig) -> Self {
        Self { config }
    }
}

impl ScoringStrategy for CornerActivity {
    fn bet_type(&self) -> BetType {
        BetType::CornerHighActivity
    }

    fn evaluate(
        &self,
        stats: &MatchStats,
        minutes: u32,
        scale: &ConfidenceScale,
    ) -> Option<Recommendation> {
        let cfg = &self.config;
        if !cfg.enabled || minutes < cfg.min_minute {
            return None;
        }

        let total_corners = stats.corners.total();
        let rate = rate_per_10(total_corners, minutes);
        let total_shots = stats.shots.total();
        let total_attacks = stats.attacks.total();

        let mut card = Scorecard::new(cfg.base_probability);
        let enough_corners =
            card.check(total_corners >= cfg.min_total_corners, cfg.corners_bonus, || {
                format!("{} corners already taken", total_corners)
            });
        if !enough_corners {
            card.adjust(-cfg.shortfall_penalty);
        }
        card.check(rate >= cfg.min_rate_per_10, cfg.rate_bonus, || {
            format!("Pace of {:.1} corners per 10 minutes", rate)
        });
        if let Some(min_shots) = cfg.min_total_shots {
            card.check(total_shots >= min_shots, cfg.shots_bonus, || {
                format!("Sustained attacking pressure ({} shots)", total_shots)
            });
        }
        if let Some(min_attacks) = cfg.min_total_attacks {
            card.check(total_attacks >= min_attacks, cfg.attacks_bonus, || {
                format!("Open game: {} attacks", total_attacks)
            });
        }

        if !cfg.gate.passes(card.fired(), card.raw_probability()) {
            return None;
        }

        card.record("total_corners", total_corners as f64);
        card.record("rhythm", (rate * 100.0).round() / 100.0);
        Some(card.finish(
            self.bet_type(),
            "Over 2.5 corners in the next 10 minutes",
            cfg.max_probability,
            scale,
            total_corners >= cfg.min_total_corners,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct CardPrediction {
    config: CardConfig,
}

impl CardPrediction {
    pub fn new(config: CardConfig) -> Self {
        Self { config }
    }
}

impl ScoringStrategy for CardPrediction {
    fn bet_type(&self) -> BetType {
        BetType::CardPrediction
    }

    fn evaluate(
        &self,
        stats: &MatchStats,
        minutes: u32,
        scale: &ConfidenceScale,
    ) -> Option<Recommendation> {
        let cfg = &self.config;
        if !cfg.enabled || minutes < cfg.min_minute {
            return None;
        }

        let total_fouls = stats.fouls.total();
        let rate = rate_per_10(total_fouls, minutes);
        let total_cards = if cfg.yellow_only {
            stats.yellow_cards.total()
        } else {
            stats.total_cards()
        };

        let mut card = Scorecard::new(cfg.base_probability);
        card.check(total_fouls >= cfg.min_total_fouls, cfg.fouls_bonus, || {
            format!("{} fouls committed", total_fouls)
        });
        card.check(rate >= cfg.min_rate_per_10, cfg.rate_bonus, || {
            format!("Pace of {:.1} fouls per 10 minutes", rate)
        });
        card.check(total_cards >= cfg.min_cards, cfg.cards_bonus, || {
            format!("{} cards already shown", total_cards)
        });

        if !cfg.gate.passes(card.fired(), card.raw_probability()) {
            return None;
        }

        card.record("total_fouls", total_fouls as f64);
        card.record("total_cards", total_cards as f64);
        Some(card.finish(
            self.bet_type(),
            "Card likely in the next 10 minutes",
            cfg.max_probability,
            scale,
            total_fouls >= cfg.min_total_fouls,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct GoalImminent {
    config: GoalConfig,
}

impl GoalImminent {
    pub fn new(config: GoalConfig) -> Self {
        Self { config }
    }
}

impl ScoringStrategy for GoalImminent {
    fn bet_type(&self) -> BetType {
        BetType::GoalImminent
    }

    fn evaluate(
        &self,
        stats: &MatchStats,
        minutes: u32,
        scale: &ConfidenceScale,
    ) -> Option<Recommendation> {
        let cfg = &self.config;
        if !cfg.enabled || minutes < cfg.min_minute {
            return None;
        }

        let total_shots = stats.shots.total();
        let on_target = stats.shots_on_target.total();
        let possession = stats.possession;
        let dominant = possession.max();
        let dangerous = stats.dangerous_attacks.total();

        let mut card = Scorecard::new(cfg.base_probability);
        if let Some(min_shots) = cfg.min_total_shots {
            card.check(total_shots >= min_shots, cfg.shots_bonus, || {
                format!("{} shots attempted", total_shots)
            });
        }
        card.check(on_target >= cfg.min_on_target, cfg.on_target_bonus, || {
            format!("{} shots on target", on_target)
        });
        if let Some(min_possession) = cfg.min_dominant_possession {
            card.check(dominant >= min_possession, cfg.possession_bonus, || {
                let side = if possession.home >= possession.away {
                    "Home"
                } else {
                    "Away"
                };
                format!("{} side dominates possession ({}%)", side, dominant)
            });
        }
        if let Some(accuracy) = stats.shot_accuracy_pct() {
            card.check(accuracy >= cfg.min_accuracy_pct, cfg.accuracy_bonus, || {
                format!("Good accuracy: {:.0}% of shots on target", accuracy)
            });
        }
        card.check(
            dangerous >= cfg.min_dangerous_attacks,
            cfg.dangerous_attacks_bonus,
            || format!("{} dangerous attacks", dangerous),
        );

        if !cfg.gate.passes(card.fired(), card.raw_probability()) {
            return None;
        }

        card.record("shots", total_shots as f64);
        card.record("on_target", on_target as f64);
        card.record("dangerous_attacks", dangerous as f64);
        Some(card.finish(
            self.bet_type(),
            "Goal likely in the next 10 minutes",
            cfg.max_probability,
            scale,
            on_target >= cfg.min_on_target,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct BothTeamsScore {
    config: BttsConfig,
}

impl BothTeamsScore {
    pub fn new(config: BttsConfig) -> Self {
        Self { config }
    }
}

impl ScoringStrategy for BothTeamsScore {
    fn bet_type(&self) -> BetType {
        BetType::BothTeamsScore
    }

    fn evaluate(
        &self,
        stats: &MatchStats,
        minutes: u32,
        scale: &ConfidenceScale,
    ) -> Option<Recommendation> {
        let cfg = &self.config;
        if !cfg.enabled || minutes < cfg.min_minute {
            return None;
        }

        let on_target = stats.shots_on_target;
        let shots = stats.shots;
        let possession = stats.possession;
        let both_on_target = on_target.both_at_least(cfg.min_on_target_each);

        let mut card = Scorecard::new(cfg.base_probability);
        card.check(both_on_target, cfg.on_target_bonus, || {
            format!(
                "Both teams hitting the target ({} vs {})",
                on_target.home, on_target.away
            )
        });
        card.check(
            possession.diff() < cfg.max_possession_diff,
            cfg.balance_bonus,
            || format!("Balanced game (possession gap {}%)", possession.diff()),
        );
        card.check(shots.both_at_least(cfg.min_shots_each), cfg.shots_bonus, || {
            format!("Both teams shooting ({} vs {})", shots.home, shots.away)
        });

        if !cfg.gate.passes(card.fired(), card.raw_probability()) {
            return None;
        }

        card.record("home_shots_on_target", on_target.home as f64);
        card.record("away_shots_on_target", on_target.away as f64);
        card.record("possession_diff", possession.diff() as f64);
        Some(card.finish(
            self.bet_type(),
            "Both teams to score",
            cfg.max_probability,
            scale,
            both_on_target,
        ))
    }
}
