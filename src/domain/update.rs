use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LiveMatch, MatchStats, Recommendation, RecommendationView};

/// Unit of broadcast: one match, its stats and the recommendations derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(rename = "type")]
    pub kind: UpdateKind,
    #[serde(rename = "match")]
    pub live_match: LiveMatch,
    pub stats: MatchStats,
    pub recommendations: Vec<RecommendationView>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    MatchUpdate,
}

impl Update {
    pub fn new(
        live_match: LiveMatch,
        stats: MatchStats,
        recommendations: &[Recommendation],
    ) -> Self {
        Self::at(live_match, stats, recommendations, Utc::now())
    }

    pub fn at(
        live_match: LiveMatch,
        stats: MatchStats,
        recommendations: &[Recommendation],
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: UpdateKind::MatchUpdate,
            live_match,
            stats,
            recommendations: recommendations.iter().map(Recommendation::to_view).collect(),
            timestamp,
        }
    }

    pub fn match_id(&self) -> &str {
        &self.live_match.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchStatus;
    use chrono::TimeZone;

    #[test]
    fn test_serializes_to_wire_shape() {
        let live_match = LiveMatch {
            id: "12345".to_string(),
            home_team: "Lyon".to_string(),
            away_team: "Lens".to_string(),
            score: "1-1".to_string(),
            elapsed_minutes: 63,
            league: "Ligue 1".to_string(),
            status: MatchStatus::Live,
        };
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 20, 15, 0).unwrap();
        let update = Update::at(live_match, MatchStats::default(), &[], ts);

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["type"], "match_update");
        assert_eq!(json["match"]["homeTeam"], "Lyon");
        assert_eq!(json["match"]["elapsedMinutes"], 63);
        assert_eq!(json["timestamp"], "2024-03-09T20:15:00Z");
        assert!(json["recommendations"].as_array().unwrap().is_empty());
    }
}
