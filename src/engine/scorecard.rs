use std::collections::BTreeMap;

use super::config::ConfidenceScale;
use crate::domain::{BetType, Recommendation};

/// Accumulates signal checks for one strategy evaluation.
///
/// Each satisfied check appends its reason and adds its increment; the order
/// of `check` calls is the order of `reasoning` in the result.
#[derive(Debug, Clone)]
pub struct Scorecard {
    probability: f64,
    reasoning: Vec<String>,
    current_stats: BTreeMap<String, f64>,
}

impl Scorecard {
    pub fn new(base_probability: f64) -> Self {
        Self {
            probability: base_probability,
            reasoning: Vec::new(),
            current_stats: BTreeMap::new(),
        }
    }

    pub fn check<F>(&mut self, condition: bool, increment: f64, reason: F) -> bool
    where
        F: FnOnce() -> String,
    {
        if condition {
            self.reasoning.push(reason());
            self.probability += increment;
        }
        condition
    }

    /// Shift the running probability without adding a reason
    pub fn adjust(&mut self, delta: f64) {
        self.probability += delta;
    }

    pub fn record(&mut self, metric: &str, value: f64) {
        self.current_stats.insert(metric.to_string(), value);
    }

    pub fn fired(&self) -> usize {
        self.reasoning.len()
    }

    /// Probability after increments, before the cap
    pub fn raw_probability(&self) -> f64 {
        round6(self.probability)
    }

    pub fn finish(
        self,
        bet_type: BetType,
        description: &str,
        cap: f64,
        scale: &ConfidenceScale,
        threshold_reached: bool,
    ) -> Recommendation {
        let probability = round6(self.probability).clamp(0.0, cap.min(1.0));
        Recommendation {
            bet_type,
            description: description.to_string(),
            confidence: scale.tier(probability),
            probability,
            reasoning: self.reasoning,
            current_stats: self.current_stats,
            threshold_reached,
        }
    }
}

/// Per-10-minute rate of a running count
pub fn rate_per_10(total: u32, minutes: u32) -> f64 {
    if minutes == 0 {
        return 0.0;
    }
    total as f64 * 10.0 / minutes as f64
}

// Additive increments drift (0.62 + 0.10 + 0.08 = 0.7999999...), which would
// flip breakpoint comparisons.
fn round6(p: f64) -> f64 {
    (p * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Confidence;

    #[test]
    fn test_check_only_counts_satisfied_signals() {
        let mut card = Scorecard::new(0.5);
        assert!(card.check(true, 0.1, || "first".to_string()));
        assert!(!card.check(false, 0.2, || "skipped".to_string()));
        assert!(card.check(true, 0.05, || "second".to_string()));

        assert_eq!(card.fired(), 2);
        assert_eq!(card.raw_probability(), 0.65);

        let rec = card.finish(
            BetType::CardPrediction,
            "test",
            0.9,
            &ConfidenceScale::default(),
            false,
        );
        assert_eq!(rec.reasoning, vec!["first", "second"]);
        assert_eq!(rec.confidence, Confidence::High);
    }

    #[test]
    fn test_finish_clamps_to_cap() {
        let mut card = Scorecard::new(0.7);
        card.check(true, 0.3, || "big".to_string());
        let rec = card.finish(
            BetType::BothTeamsScore,
            "test",
            0.78,
            &ConfidenceScale::default(),
            true,
        );
        assert_eq!(rec.probability, 0.78);
        assert_eq!(rec.confidence, Confidence::VeryHigh);
    }

    #[test]
    fn test_rounding_removes_float_drift() {
        let mut card = Scorecard::new(0.62);
        card.check(true, 0.10, String::new);
        card.check(true, 0.08, String::new);
        assert_eq!(card.raw_probability(), 0.8);
    }

    #[test]
    fn test_adjust_leaves_reasoning_alone() {
        let mut card = Scorecard::new(0.75);
        card.adjust(-0.10);
        assert_eq!(card.fired(), 0);
        assert_eq!(card.raw_probability(), 0.65);
    }

    #[test]
    fn test_rate_handles_kickoff() {
        assert_eq!(rate_per_10(9, 0), 0.0);
        assert_eq!(rate_per_10(9, 60), 1.5);
    }
}
