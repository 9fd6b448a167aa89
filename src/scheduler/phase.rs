use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the polling loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulerPhase {
    /// Constructed, loop not started
    Idle,
    /// Waiting on the provider (live listing or one match's stats)
    Fetching,
    Normalizing,
    Scoring,
    Publishing,
    /// Between cycles, either the regular interval or the error backoff
    Sleeping,
    /// Cancelled; provider released
    Stopped,
}

impl SchedulerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerPhase::Idle => "IDLE",
            SchedulerPhase::Fetching => "FETCHING",
            SchedulerPhase::Normalizing => "NORMALIZING",
            SchedulerPhase::Scoring => "SCORING",
            SchedulerPhase::Publishing => "PUBLISHING",
            SchedulerPhase::Sleeping => "SLEEPING",
            SchedulerPhase::Stopped => "STOPPED",
        }
    }

    /// Check if this phase can move to `target`
    pub fn can_transition_to(&self, target: SchedulerPhase) -> bool {
        use SchedulerPhase::*;

        match (self, target) {
            (Idle, Fetching) => true,

            // Next match in the same cycle, or the listing failed
            (Fetching, Normalizing) => true,
            (Fetching, Fetching) => true,
            (Fetching, Sleeping) => true,

            (Normalizing, Scoring) => true,
            (Scoring, Publishing) => true,

            (Publishing, Fetching) => true,
            (Publishing, Sleeping) => true,

            (Sleeping, Fetching) => true,

            // Cancellation is honoured from every suspension point
            (Idle | Fetching | Sleeping | Publishing, Stopped) => true,

            _ => false,
        }
    }
}

impl fmt::Display for SchedulerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_transitions() {
        use SchedulerPhase::*;
        let cycle = [Idle, Fetching, Normalizing, Scoring, Publishing, Sleeping, Fetching];
        for pair in cycle.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_invalid_transitions() {
        use SchedulerPhase::*;
        assert!(!Idle.can_transition_to(Publishing));
        assert!(!Scoring.can_transition_to(Fetching));
        assert!(!Stopped.can_transition_to(Fetching));
        assert!(!Normalizing.can_transition_to(Stopped));
    }

    #[test]
    fn test_serializes_upper_case() {
        let json = serde_json::to_string(&SchedulerPhase::Sleeping).unwrap();
        assert_eq!(json, "\"SLEEPING\"");
    }
}
