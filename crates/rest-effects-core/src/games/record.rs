// Enriched per-team game rows and the categorical attributes derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Venue
// ---------------------------------------------------------------------------

/// Whether the team played at home or on the road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// Parse a venue string (`HOME` / `AWAY`, any case).
    pub fn from_str_venue(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HOME" => Some(Venue::Home),
            "AWAY" => Some(Venue::Away),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Venue::Home => "HOME",
            Venue::Away => "AWAY",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Game result
// ---------------------------------------------------------------------------

/// Outcome of a game from the team's perspective.
///
/// Ties are recorded as `Loss`: only a strictly higher goals-for count is a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    pub fn from_score(goals_for: u32, goals_against: u32) -> Self {
        if goals_for > goals_against {
            GameResult::Win
        } else {
            GameResult::Loss
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, GameResult::Win)
    }
}

// ---------------------------------------------------------------------------
// Rest bucket
// ---------------------------------------------------------------------------

/// Categorical grouping of rest days. Variant order is the canonical
/// display order, so `Ord` sorts buckets `0, 1, 2, 3+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RestBucket {
    Zero,
    One,
    Two,
    ThreePlus,
}

impl RestBucket {
    /// Every bucket in canonical order.
    pub const ALL: [RestBucket; 4] = [
        RestBucket::Zero,
        RestBucket::One,
        RestBucket::Two,
        RestBucket::ThreePlus,
    ];

    pub fn from_rest_days(days: u32) -> Self {
        match days {
            0 => RestBucket::Zero,
            1 => RestBucket::One,
            2 => RestBucket::Two,
            _ => RestBucket::ThreePlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RestBucket::Zero => "0",
            RestBucket::One => "1",
            RestBucket::Two => "2",
            RestBucket::ThreePlus => "3+",
        }
    }
}

impl fmt::Display for RestBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rest bucket `{0}` (expected one of 0, 1, 2, 3+)")]
pub struct ParseRestBucketError(pub String);

impl FromStr for RestBucket {
    type Err = ParseRestBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(RestBucket::Zero),
            "1" => Ok(RestBucket::One),
            "2" => Ok(RestBucket::Two),
            "3+" => Ok(RestBucket::ThreePlus),
            other => Err(ParseRestBucketError(other.to_string())),
        }
    }
}

impl Serialize for RestBucket {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RestBucket {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Game record
// ---------------------------------------------------------------------------

/// One row per team per game, after cleaning and enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub team: String,
    /// True when the raw team code was not recognised by the alias table.
    pub team_flagged: bool,
    pub game_date: NaiveDate,
    pub season: i32,
    pub opponent: String,
    pub venue: Venue,
    pub xgf: f64,
    pub xga: f64,
    /// Expected-goal share in percent; `None` when both xG inputs are zero.
    pub xg_pct: Option<f64>,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
    pub result: GameResult,
    /// Full days off before this game; `None` for a team's first game.
    pub rest_days: Option<u32>,
    pub rest_bucket: Option<RestBucket>,
}

/// Expected-goal share `xgf / (xgf + xga) * 100`.
///
/// Returns `None` when the denominator is zero or an input is not finite.
pub fn xg_share(xgf: f64, xga: f64) -> Option<f64> {
    if !xgf.is_finite() || !xga.is_finite() {
        return None;
    }
    let total = xgf + xga;
    if total == 0.0 {
        return None;
    }
    Some(xgf / total * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_mapping_is_deterministic() {
        assert_eq!(RestBucket::from_rest_days(0), RestBucket::Zero);
        assert_eq!(RestBucket::from_rest_days(1), RestBucket::One);
        assert_eq!(RestBucket::from_rest_days(2), RestBucket::Two);
        assert_eq!(RestBucket::from_rest_days(3), RestBucket::ThreePlus);
        assert_eq!(RestBucket::from_rest_days(11), RestBucket::ThreePlus);
    }

    #[test]
    fn bucket_order_follows_labels() {
        let mut buckets = vec![
            RestBucket::ThreePlus,
            RestBucket::Zero,
            RestBucket::Two,
            RestBucket::One,
        ];
        buckets.sort();
        assert_eq!(buckets, RestBucket::ALL.to_vec());
    }

    #[test]
    fn bucket_labels_parse_back() {
        for bucket in RestBucket::ALL {
            assert_eq!(bucket.label().parse::<RestBucket>().unwrap(), bucket);
        }
        assert!("4".parse::<RestBucket>().is_err());
    }

    #[test]
    fn bucket_serializes_as_label() {
        let json = serde_json::to_string(&RestBucket::ThreePlus).unwrap();
        assert_eq!(json, "\"3+\"");
    }

    #[test]
    fn tie_is_a_loss() {
        assert_eq!(GameResult::from_score(3, 3), GameResult::Loss);
        assert_eq!(GameResult::from_score(4, 3), GameResult::Win);
        assert_eq!(GameResult::from_score(1, 2), GameResult::Loss);
    }

    #[test]
    fn xg_share_guards_zero_denominator() {
        assert_eq!(xg_share(0.0, 0.0), None);
        assert_eq!(xg_share(f64::NAN, 1.0), None);
        let pct = xg_share(3.0, 1.0).unwrap();
        assert!((pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn venue_parses_any_case() {
        assert_eq!(Venue::from_str_venue("HOME"), Some(Venue::Home));
        assert_eq!(Venue::from_str_venue(" away "), Some(Venue::Away));
        assert_eq!(Venue::from_str_venue("neutral"), None);
    }
}
