//! Raw provider statistics -> canonical [`MatchStats`].
//!
//! Two raw layouts are understood:
//! - grouped: `{"statistics": [{"groups": [{"statisticsItems": [{"name", "home", "away"}]}]}]}`,
//!   one entry per period;
//! - flat: `{"corners": {"home": 5, "away": 4}, "cards": {"yellow": 2, "red": 0}, ...}`.
//!
//! Normalization is total. Unknown names are skipped, missing values read as zero and
//! a value that is not an integer zeroes both sides of its metric.

use serde_json::Value;
use tracing::debug;

use crate::domain::{MatchStats, StatPair};
use crate::error::ParseError;

/// Raw statistics record exactly as returned by a provider
pub type RawStats = Value;

/// Canonical metric a provider field name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Corners,
    YellowCards,
    RedCards,
    Fouls,
    ShotsOnTarget,
    Shots,
    Possession,
    Offsides,
    ThrowIns,
    DangerousAttacks,
    Attacks,
}

impl Metric {
    /// Resolve a provider field name. First match wins, so the more specific
    /// names ("shots on target", "dangerous attacks") are tested before the
    /// generic ones.
    pub fn classify(name: &str) -> Option<Metric> {
        let name = name.trim().to_lowercase();
        let has_word = |word: &str| {
            name.split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word)
        };

        if name.contains("corner") {
            Some(Metric::Corners)
        } else if name.contains("yellow") {
            Some(Metric::YellowCards)
        } else if has_word("red") || has_word("reds") {
            Some(Metric::RedCards)
        } else if name.contains("foul") {
            Some(Metric::Fouls)
        } else if name.contains("on target") {
            Some(Metric::ShotsOnTarget)
        } else if name == "shots" || name.contains("total shot") {
            Some(Metric::Shots)
        } else if name.contains("possession") {
            Some(Metric::Possession)
        } else if name.contains("offside") {
            Some(Metric::Offsides)
        } else if name.contains("throw") {
            Some(Metric::ThrowIns)
        } else if name.contains("dangerous attack") {
            Some(Metric::DangerousAttacks)
        } else if name.contains("attack") && !name.contains("dangerous") {
            Some(Metric::Attacks)
        } else {
            None
        }
    }

    /// Percentages are snapshots, everything else is a running count
    pub fn is_additive(&self) -> bool {
        !matches!(self, Metric::Possession)
    }

    fn slot<'a>(&self, stats: &'a mut MatchStats) -> &'a mut StatPair {
        match self {
            Metric::Corners => &mut stats.corners,
            Metric::YellowCards => &mut stats.yellow_cards,
            Metric::RedCards => &mut stats.red_cards,
            Metric::Fouls => &mut stats.fouls,
            Metric::ShotsOnTarget => &mut stats.shots_on_target,
            Metric::Shots => &mut stats.shots,
            Metric::Possession => &mut stats.possession,
            Metric::Offsides => &mut stats.offsides,
            Metric::ThrowIns => &mut stats.throw_ins,
            Metric::DangerousAttacks => &mut stats.dangerous_attacks,
            Metric::Attacks => &mut stats.attacks,
        }
    }

    fn apply(&self, stats: &mut MatchStats, pair: StatPair) {
        let slot = self.slot(stats);
        if self.is_additive() {
            slot.accumulate(pair);
        } else {
            *slot = pair;
        }
    }
}

/// Normalize a raw provider record. Never fails.
pub fn normalize(raw: &RawStats) -> MatchStats {
    let mut stats = MatchStats::default();

    if let Some(periods) = raw.get("statistics").and_then(Value::as_array) {
        for period in periods {
            let groups = period.get("groups").and_then(Value::as_array);
            for group in groups.into_iter().flatten() {
                let items = group.get("statisticsItems").and_then(Value::as_array);
                for item in items.into_iter().flatten() {
                    let name = item.get("name").and_then(Value::as_str).unwrap_or_default();
                    let home = item.get("home").or_else(|| item.get("homeValue"));
                    let away = item.get("away").or_else(|| item.get("awayValue"));
                    apply_item(&mut stats, name, home, away);
                }
            }
        }
    } else if let Some(fields) = raw.as_object() {
        for (key, value) in fields {
            if key.eq_ignore_ascii_case("cards") {
                apply_card_totals(&mut stats, value);
                continue;
            }
            if !value.is_object() {
                continue;
            }
            apply_item(&mut stats, &field_words(key), value.get("home"), value.get("away"));
        }
    }

    stats
}

fn apply_item(stats: &mut MatchStats, name: &str, home: Option<&Value>, away: Option<&Value>) {
    let Some(metric) = Metric::classify(name) else {
        return;
    };
    metric.apply(stats, parse_pair(name, home, away));
}

/// `cards: {yellow, red}` carries match totals without a side; they are
/// recorded on the home side so totals stay correct.
fn apply_card_totals(stats: &mut MatchStats, value: &Value) {
    for (field, metric) in [("yellow", Metric::YellowCards), ("red", Metric::RedCards)] {
        let total = match parse_value(field, value.get(field)) {
            Ok(v) => v,
            Err(err) => {
                debug!("Treating unparseable card total as zero: {}", err);
                0
            }
        };
        metric.apply(stats, StatPair::new(total, 0));
    }
}

fn parse_pair(metric: &str, home: Option<&Value>, away: Option<&Value>) -> StatPair {
    match (parse_value(metric, home), parse_value(metric, away)) {
        (Ok(home), Ok(away)) => StatPair::new(home, away),
        (Err(err), _) | (_, Err(err)) => {
            debug!("Treating unparseable stat as zero: {}", err);
            StatPair::default()
        }
    }
}

/// Read one side of a stat as a non-negative integer, tolerating a trailing `%`.
pub fn parse_value(metric: &str, value: Option<&Value>) -> Result<u32, ParseError> {
    let not_numeric = |raw: String| ParseError::NotNumeric {
        metric: metric.to_string(),
        raw,
    };

    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).map_err(|_| not_numeric(n.to_string()))
            } else {
                match n.as_f64() {
                    Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
                        Ok(f as u32)
                    }
                    _ => Err(not_numeric(n.to_string())),
                }
            }
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
            digits.parse::<u32>().map_err(|_| not_numeric(s.clone()))
        }
        Some(other) => Err(not_numeric(other.to_string())),
    }
}

/// `shotsOnTarget` / `yellow_cards` -> `shots on target` / `yellow cards`
fn field_words(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.chars() {
        if c == '_' || c == '-' {
            out.push(' ');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_prefers_specific_names() {
        assert_eq!(Metric::classify("Shots on target"), Some(Metric::ShotsOnTarget));
        assert_eq!(Metric::classify("Total shots"), Some(Metric::Shots));
        assert_eq!(Metric::classify("Dangerous attacks"), Some(Metric::DangerousAttacks));
        assert_eq!(Metric::classify("Attacks"), Some(Metric::Attacks));
        assert_eq!(Metric::classify("Ball possession"), Some(Metric::Possession));
        assert_eq!(Metric::classify("Corner kicks"), Some(Metric::Corners));
        assert_eq!(Metric::classify("Red cards"), Some(Metric::RedCards));
    }

    #[test]
    fn test_classify_ignores_unrelated_names() {
        assert_eq!(Metric::classify("Shots off target"), None);
        assert_eq!(Metric::classify("Big chances scored"), None);
        assert_eq!(Metric::classify("Passes"), None);
    }

    #[test]
    fn test_field_words_splits_camel_and_snake_case() {
        assert_eq!(field_words("shotsOnTarget"), "shots on target");
        assert_eq!(field_words("yellow_cards"), "yellow cards");
        assert_eq!(field_words("corners"), "corners");
    }

    #[test]
    fn test_parse_value_strips_percent() {
        assert_eq!(parse_value("possession", Some(&json!("55%"))), Ok(55));
        assert_eq!(parse_value("possession", Some(&json!(" 45 % "))), Ok(45));
        assert_eq!(parse_value("corners", Some(&json!(7))), Ok(7));
        assert_eq!(parse_value("corners", None), Ok(0));
        assert!(parse_value("corners", Some(&json!("abc%"))).is_err());
        assert!(parse_value("corners", Some(&json!(-2))).is_err());
        assert!(parse_value("corners", Some(&json!(2.5))).is_err());
    }

    #[test]
    fn test_flat_record_maps_card_totals() {
        let stats = normalize(&json!({
            "fouls": {"home": 12, "away": 10},
            "cards": {"yellow": 2, "red": 1},
            "source": "sofascore"
        }));
        assert_eq!(stats.fouls, StatPair::new(12, 10));
        assert_eq!(stats.yellow_cards.total(), 2);
        assert_eq!(stats.red_cards.total(), 1);
        assert_eq!(stats.total_cards(), 3);
    }
}
