use serde::{Deserialize, Serialize};

/// Home/away value pair for one metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPair {
    pub home: u32,
    pub away: u32,
}

impl StatPair {
    pub const fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn total(&self) -> u32 {
        self.home.saturating_add(self.away)
    }

    /// Larger of the two sides
    pub fn max(&self) -> u32 {
        self.home.max(self.away)
    }

    /// Absolute gap between the two sides
    pub fn diff(&self) -> u32 {
        self.home.abs_diff(self.away)
    }

    /// Both sides at or above `min`
    pub fn both_at_least(&self, min: u32) -> bool {
        self.home >= min && self.away >= min
    }

    pub(crate) fn accumulate(&mut self, other: StatPair) {
        self.home = self.home.saturating_add(other.home);
        self.away = self.away.saturating_add(other.away);
    }
}

/// Canonical, provider-agnostic match statistics.
///
/// Every metric defaults to `0/0` except possession, which defaults to
/// `50/50` when the source never reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub corners: StatPair,
    pub fouls: StatPair,
    pub yellow_cards: StatPair,
    pub red_cards: StatPair,
    pub shots: StatPair,
    pub shots_on_target: StatPair,
    pub possession: StatPair,
    pub dangerous_attacks: StatPair,
    pub offsides: StatPair,
    pub throw_ins: StatPair,
    pub attacks: StatPair,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            corners: StatPair::default(),
            fouls: StatPair::default(),
            yellow_cards: StatPair::default(),
            red_cards: StatPair::default(),
            shots: StatPair::default(),
            shots_on_target: StatPair::default(),
            possession: StatPair::new(50, 50),
            dangerous_attacks: StatPair::default(),
            offsides: StatPair::default(),
            throw_ins: StatPair::default(),
            attacks: StatPair::default(),
        }
    }
}

impl MatchStats {
    /// Yellow plus red cards shown to both teams
    pub fn total_cards(&self) -> u32 {
        self.yellow_cards.total().saturating_add(self.red_cards.total())
    }

    /// Shots on target as a percentage of total shots, `None` before the first shot
    pub fn shot_accuracy_pct(&self) -> Option<f64> {
        let shots = self.shots.total();
        if shots == 0 {
            return None;
        }
        Some(self.shots_on_target.total() as f64 / shots as f64 * 100.0)
    }
}
