use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a fixture as reported upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Live,
    Finished,
    Scheduled,
    #[serde(untagged)]
    Other(String),
}

impl MatchStatus {
    /// Map a provider status type (`inprogress`, `finished`, `notstarted`, ...)
    pub fn from_provider(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inprogress" | "live" => MatchStatus::Live,
            "finished" => MatchStatus::Finished,
            "notstarted" | "scheduled" => MatchStatus::Scheduled,
            "" => MatchStatus::Other("unknown".to_string()),
            other => MatchStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Live => write!(f, "live"),
            MatchStatus::Finished => write!(f, "finished"),
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A fixture currently tracked by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatch {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    /// "home-away", e.g. "1-0"
    pub score: String,
    pub elapsed_minutes: u32,
    pub league: String,
    pub status: MatchStatus,
}

impl LiveMatch {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_status_mapping() {
        assert_eq!(MatchStatus::from_provider("inprogress"), MatchStatus::Live);
        assert_eq!(MatchStatus::from_provider("Finished"), MatchStatus::Finished);
        assert_eq!(
            MatchStatus::from_provider("postponed"),
            MatchStatus::Other("postponed".to_string())
        );
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(MatchStatus::Live).unwrap(), "live");
        assert_eq!(
            serde_json::to_value(MatchStatus::Other("interrupted".to_string())).unwrap(),
            "interrupted"
        );
    }
}
