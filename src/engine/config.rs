use serde::Deserialize;

use crate::domain::Confidence;

/// Probability breakpoints for confidence tiers (lower bounds, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfidenceScale {
    pub very_high: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for ConfidenceScale {
    fn default() -> Self {
        Self {
            very_high: 0.75,
            high: 0.65,
            medium: 0.55,
            low: 0.45,
        }
    }
}

impl ConfidenceScale {
    /// Breakpoints used by the older expert-system rule set
    pub fn legacy() -> Self {
        Self {
            very_high: 0.80,
            high: 0.70,
            medium: 0.60,
            low: 0.50,
        }
    }

    pub fn tier(&self, probability: f64) -> Confidence {
        if probability >= self.very_high {
            Confidence::VeryHigh
        } else if probability >= self.high {
            Confidence::High
        } else if probability >= self.medium {
            Confidence::Medium
        } else if probability >= self.low {
            Confidence::Low
        } else {
            Confidence::VeryLow
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CornerConfig {
    pub enabled: bool,
    /// Earliest minute the strategy may fire
    pub min_minute: u32,
    pub base_probability: f64,
    pub max_probability: f64,
    pub min_total_corners: u32,
    pub corners_bonus: f64,
    /// Corners per 10 minutes
    pub min_rate_per_10: f64,
    pub rate_bonus: f64,
    pub min_total_shots: Option<u32>,
    pub shots_bonus: f64,
    pub min_total_attacks: Option<u32>,
    pub attacks_bonus: f64,
    /// Subtracted when `min_total_corners` is not reached
    pub shortfall_penalty: f64,
    pub gate: EmitGate,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_minute: 55,
            base_probability: 0.62,
            max_probability: 0.88,
            min_total_corners: 8,
            corners_bonus: 0.10,
            min_rate_per_10: 1.5,
            rate_bonus: 0.08,
            min_total_shots: Some(15),
            shots_bonus: 0.08,
            min_total_attacks: None,
            attacks_bonus: 0.07,
            shortfall_penalty: 0.0,
            gate: EmitGate::AnySignal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub enabled: bool,
    pub min_minute: u32,
    pub base_probability: f64,
    pub max_probability: f64,
    pub min_total_fouls: u32,
    pub fouls_bonus: f64,
    /// Fouls per 10 minutes
    pub min_rate_per_10: f64,
    pub rate_bonus: f64,
    pub min_cards: u32,
    pub cards_bonus: f64,
    /// Count only yellow cards towards `min_cards`
    pub yellow_only: bool,
    pub gate: EmitGate,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_minute: 60,
            base_probability: 0.58,
            max_probability: 0.85,
            min_total_fouls: 20,
            fouls_bonus: 0.10,
            min_rate_per_10: 3.0,
            rate_bonus: 0.08,
            min_cards: 2,
            cards_bonus: 0.09,
            yellow_only: false,
            gate: EmitGate::AnySignal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub enabled: bool,
    pub min_minute: u32,
    pub base_probability: f64,
    pub max_probability: f64,
    pub min_total_shots: Option<u32>,
    pub shots_bonus: f64,
    pub min_on_target: u32,
    pub on_target_bonus: f64,
    /// Possession % of the dominant side
    pub min_dominant_possession: Option<u32>,
    pub possession_bonus: f64,
    /// Shots on target as % of total shots
    pub min_accuracy_pct: f64,
    pub accuracy_bonus: f64,
    pub min_dangerous_attacks: u32,
    pub dangerous_attacks_bonus: f64,
    pub gate: EmitGate,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_minute: 50,
            base_probability: 0.55,
            max_probability: 0.82,
            min_total_shots: Some(12),
            shots_bonus: 0.08,
            min_on_target: 5,
            on_target_bonus: 0.10,
            min_dominant_possession: Some(55),
            possession_bonus: 0.07,
            min_accuracy_pct: 40.0,
            accuracy_bonus: 0.07,
            min_dangerous_attacks: 40,
            dangerous_attacks_bonus: 0.10,
            gate: EmitGate::AnySignal,
        }
    }
}

/// What an evaluation must reach before it is emitted
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "value")]
pub enum EmitGate {
    /// At least one signal fired
    AnySignal,
    /// Final probability (before the cap) at or above the floor
    MinProbability(f64),
}

impl EmitGate {
    pub fn passes(&self, signals_fired: usize, raw_probability: f64) -> bool {
        match *self {
            EmitGate::AnySignal => signals_fired > 0,
            EmitGate::MinProbability(floor) => raw_probability >= floor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BttsConfig {
    pub enabled: bool,
    pub min_minute: u32,
    pub base_probability: f64,
    pub max_probability: f64,
    pub min_on_target_each: u32,
    pub on_target_bonus: f64,
    /// Strictly below this gap in possession points
    pub max_possession_diff: u32,
    pub balance_bonus: f64,
    pub min_shots_each: u32,
    pub shots_bonus: f64,
    pub gate: EmitGate,
}

impl Default for BttsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_minute: 40,
            base_probability: 0.52,
            max_probability: 0.78,
            min_on_target_each: 3,
            on_target_bonus: 0.12,
            max_possession_diff: 15,
            balance_bonus: 0.08,
            min_shots_each: 5,
            shots_bonus: 0.06,
            gate: EmitGate::AnySignal,
        }
    }
}

/// Every tunable of the recommendation engine
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct StrategyConfig {
    pub confidence: ConfidenceScale,
    pub corners: CornerConfig,
    pub cards: CardConfig,
    pub goals: GoalConfig,
    pub btts: BttsConfig,
}

impl StrategyConfig {
    /// The older expert-system rule set. It disagrees with the defaults on
    /// gates, breakpoints, bases, increments and emit floors, and has no caps;
    /// kept selectable rather than merged.
    pub fn legacy() -> Self {
        Self {
            confidence: ConfidenceScale::legacy(),
            corners: CornerConfig {
                min_minute: 60,
                base_probability: 0.75,
                max_probability: 1.0,
                min_total_shots: None,
                min_total_attacks: Some(80),
                shortfall_penalty: 0.10,
                gate: EmitGate::MinProbability(0.60),
                ..CornerConfig::default()
            },
            cards: CardConfig {
                min_minute: 45,
                base_probability: 0.70,
                max_probability: 1.0,
                fouls_bonus: 0.12,
                min_rate_per_10: 4.0,
                min_cards: 3,
                cards_bonus: 0.10,
                yellow_only: true,
                gate: EmitGate::MinProbability(0.55),
                ..CardConfig::default()
            },
            goals: GoalConfig {
                min_minute: 55,
                base_probability: 0.65,
                max_probability: 1.0,
                min_total_shots: None,
                on_target_bonus: 0.13,
                min_dominant_possession: None,
                gate: EmitGate::MinProbability(0.60),
                ..GoalConfig::default()
            },
            btts: BttsConfig {
                min_minute: 50,
                base_probability: 0.68,
                max_probability: 1.0,
                // gap of at most 15
                max_possession_diff: 16,
                balance_bonus: 0.10,
                shots_bonus: 0.08,
                gate: EmitGate::MinProbability(0.65),
                ..BttsConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale_tiers() {
        let scale = ConfidenceScale::default();
        assert_eq!(scale.tier(0.75), Confidence::VeryHigh);
        assert_eq!(scale.tier(0.74), Confidence::High);
        assert_eq!(scale.tier(0.65), Confidence::High);
        assert_eq!(scale.tier(0.55), Confidence::Medium);
        assert_eq!(scale.tier(0.45), Confidence::Low);
        assert_eq!(scale.tier(0.44), Confidence::VeryLow);
    }

    #[test]
    fn test_legacy_scale_is_stricter() {
        let scale = ConfidenceScale::legacy();
        assert_eq!(scale.tier(0.78), Confidence::High);
        assert_eq!(scale.tier(0.80), Confidence::VeryHigh);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: StrategyConfig = serde_json::from_value(serde_json::json!({
            "corners": { "min_minute": 60 },
            "btts": { "gate": { "policy": "min_probability", "value": 0.65 } }
        }))
        .unwrap();
        assert_eq!(cfg.corners.min_minute, 60);
        assert_eq!(cfg.corners.min_total_corners, 8);
        assert_eq!(cfg.btts.gate, EmitGate::MinProbability(0.65));
        assert_eq!(cfg.cards, CardConfig::default());
        assert_eq!(cfg.goals.min_total_shots, Some(12));
    }

    #[test]
    fn test_emit_gate_policies() {
        assert!(!EmitGate::AnySignal.passes(0, 0.9));
        assert!(EmitGate::AnySignal.passes(1, 0.1));
        assert!(EmitGate::MinProbability(0.65).passes(0, 0.65));
        assert!(!EmitGate::MinProbability(0.65).passes(3, 0.64));
    }
}
