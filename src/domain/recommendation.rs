use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Bet families a strategy can recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetType {
    CornerHighActivity,
    CardPrediction,
    GoalImminent,
    BothTeamsScore,
}

impl BetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::CornerHighActivity => "CORNER_HIGH_ACTIVITY",
            BetType::CardPrediction => "CARD_PREDICTION",
            BetType::GoalImminent => "GOAL_IMMINENT",
            BetType::BothTeamsScore => "BOTH_TEAMS_SCORE",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display tier for a probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::VeryHigh => "VERY_HIGH",
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
            Confidence::VeryLow => "VERY_LOW",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One triggered strategy for one evaluation cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub bet_type: BetType,
    pub description: String,
    pub confidence: Confidence,
    /// In `[0, 1]`, already clamped to the strategy cap
    pub probability: f64,
    /// Justifications in evaluation order
    pub reasoning: Vec<String>,
    /// Metric values that fed the evaluation
    pub current_stats: BTreeMap<String, f64>,
    pub threshold_reached: bool,
}

impl Recommendation {
    /// Probability as a percentage rounded to one decimal place
    pub fn probability_pct(&self) -> f64 {
        (self.probability * 1000.0).round() / 10.0
    }

    pub fn to_view(&self) -> RecommendationView {
        RecommendationView {
            bet_type: self.bet_type,
            description: self.description.clone(),
            confidence: self.confidence,
            probability: self.probability_pct(),
            reasoning: self.reasoning.clone(),
            current_stats: self.current_stats.clone(),
            threshold_reached: Some(self.threshold_reached),
        }
    }
}

/// Externally visible recommendation, probability rendered as a percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub bet_type: BetType,
    pub description: String,
    pub confidence: Confidence,
    pub probability: f64,
    pub reasoning: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub current_stats: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_reached: Option<bool>,
}
