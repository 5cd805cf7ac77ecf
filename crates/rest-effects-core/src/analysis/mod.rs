// Aggregations over enriched game records: rest-bucket summaries, fatigue
// ranking, back-to-back pairing and rolling metrics.

pub mod back_to_back;
pub mod ranking;
pub mod rolling;
pub mod summary;

use crate::games::record::RestBucket;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("no games for {0}")]
    InsufficientData(String),

    #[error("expected games for a single team, found {}", teams.join(", "))]
    MultipleTeams { teams: Vec<String> },

    #[error("rolling window must be at least 1")]
    InvalidWindow,
}

impl AnalysisError {
    pub(crate) fn no_games_for_bucket(team: &str, bucket: RestBucket) -> Self {
        AnalysisError::InsufficientData(format!("team {team} with rest bucket {bucket}"))
    }
}

/// Arithmetic mean; `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::games::record::{GameRecord, GameResult, RestBucket, Venue};
    use chrono::NaiveDate;

    /// Build a record on `2023-10-01 + day` with the given rest value and an
    /// exact xG%.
    pub fn game(team: &str, day: i64, rest: Option<u32>, xg_pct: f64, gf: u32, ga: u32) -> GameRecord {
        let base = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
        let xgf = xg_pct / 10.0;
        let xga = (100.0 - xg_pct) / 10.0;
        GameRecord {
            team: team.into(),
            team_flagged: false,
            game_date: base + chrono::Duration::days(day),
            season: 2023,
            opponent: "OPP".into(),
            venue: Venue::Home,
            xgf,
            xga,
            xg_pct: Some(xg_pct),
            goals_for: gf,
            goals_against: ga,
            goal_diff: gf as i32 - ga as i32,
            result: GameResult::from_score(gf, ga),
            rest_days: rest,
            rest_bucket: rest.map(RestBucket::from_rest_days),
        }
    }
}
