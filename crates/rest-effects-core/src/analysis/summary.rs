// Per-bucket performance summaries.

use crate::analysis::{mean, AnalysisError};
use crate::games::record::{GameRecord, RestBucket};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean performance for one rest bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRestSummary {
    /// Set when every summarized game belongs to the same team.
    pub team: Option<String>,
    pub bucket: RestBucket,
    pub games: usize,
    /// `None` only when no game in the bucket has a defined xG%.
    pub mean_xg_pct: Option<f64>,
    pub mean_goals_for: f64,
    pub mean_goals_against: f64,
    pub mean_goal_diff: f64,
    /// Fraction of games won, 0.0 to 1.0.
    pub win_rate: f64,
}

impl TeamRestSummary {
    pub fn win_pct(&self) -> f64 {
        self.win_rate * 100.0
    }
}

/// Summarize one non-empty group of games.
pub(crate) fn summarize_group(team: Option<String>, bucket: RestBucket, games: &[&GameRecord]) -> TeamRestSummary {
    let n = games.len() as f64;
    let wins = games.iter().filter(|g| g.result.is_win()).count();
    TeamRestSummary {
        team,
        bucket,
        games: games.len(),
        mean_xg_pct: mean(games.iter().filter_map(|g| g.xg_pct)),
        mean_goals_for: games.iter().map(|g| g.goals_for as f64).sum::<f64>() / n,
        mean_goals_against: games.iter().map(|g| g.goals_against as f64).sum::<f64>() / n,
        mean_goal_diff: games.iter().map(|g| g.goal_diff as f64).sum::<f64>() / n,
        win_rate: wins as f64 / n,
    }
}

fn single_team(games: &[GameRecord]) -> Option<String> {
    let first = games.first()?;
    games
        .iter()
        .all(|g| g.team == first.team)
        .then(|| first.team.clone())
}

/// Group games by rest bucket and compute mean statistics per bucket.
///
/// Games without a rest bucket (season openers) are excluded. Buckets with
/// no games are omitted, and rows come back in bucket order `0, 1, 2, 3+`.
/// Pre-filter the table to one team for a team summary.
pub fn summarize_rest_buckets(games: &[GameRecord]) -> Vec<TeamRestSummary> {
    let team = single_team(games);
    let mut groups: BTreeMap<RestBucket, Vec<&GameRecord>> = BTreeMap::new();
    for game in games {
        if let Some(bucket) = game.rest_bucket {
            groups.entry(bucket).or_default().push(game);
        }
    }

    groups
        .into_iter()
        .map(|(bucket, group)| summarize_group(team.clone(), bucket, &group))
        .collect()
}

/// Summarize a single team/bucket combination.
///
/// Unlike [`summarize_rest_buckets`], an empty combination is an error
/// because the caller asked for it explicitly.
pub fn summarize_team_bucket(
    games: &[GameRecord],
    team: &str,
    bucket: RestBucket,
) -> Result<TeamRestSummary, AnalysisError> {
    let group: Vec<&GameRecord> = games
        .iter()
        .filter(|g| g.team == team && g.rest_bucket == Some(bucket))
        .collect();
    if group.is_empty() {
        return Err(AnalysisError::no_games_for_bucket(team, bucket));
    }
    Ok(summarize_group(Some(team.to_string()), bucket, &group))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::game;

    const EPS: f64 = 1e-9;

    #[test]
    fn one_game_per_bucket_gives_four_rows() {
        let games = vec![
            game("STL", 0, None, 50.0, 2, 1),
            game("STL", 1, Some(0), 48.0, 1, 2),
            game("STL", 3, Some(1), 52.0, 3, 1),
            game("STL", 6, Some(2), 55.0, 2, 2),
            game("STL", 10, Some(3), 60.0, 4, 0),
        ];
        let summary = summarize_rest_buckets(&games);
        assert_eq!(summary.len(), 4);
        let buckets: Vec<RestBucket> = summary.iter().map(|s| s.bucket).collect();
        assert_eq!(buckets, RestBucket::ALL.to_vec());
        assert!(summary.iter().all(|s| s.games == 1));
        assert!(summary.iter().all(|s| s.team.as_deref() == Some("STL")));
    }

    #[test]
    fn zero_rest_means_match_expected() {
        let games = vec![
            game("STL", 1, Some(0), 45.0, 2, 3),
            game("STL", 5, Some(0), 50.6, 4, 1),
        ];
        let summary = summarize_rest_buckets(&games);
        assert_eq!(summary.len(), 1);
        let row = &summary[0];
        assert_eq!(row.bucket, RestBucket::Zero);
        assert_eq!(row.games, 2);
        assert!((row.mean_xg_pct.unwrap() - 47.8).abs() < EPS);
        assert!((row.mean_goals_for - 3.0).abs() < EPS);
        assert!((row.mean_goals_against - 2.0).abs() < EPS);
        assert!((row.mean_goal_diff - 1.0).abs() < EPS);
        assert!((row.win_rate - 0.5).abs() < EPS);
        assert!((row.win_pct() - 50.0).abs() < EPS);
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let games = vec![
            game("STL", 1, Some(0), 45.0, 2, 3),
            game("STL", 9, Some(5), 55.0, 2, 1),
        ];
        let summary = summarize_rest_buckets(&games);
        let buckets: Vec<RestBucket> = summary.iter().map(|s| s.bucket).collect();
        assert_eq!(buckets, vec![RestBucket::Zero, RestBucket::ThreePlus]);
        assert!(summary.iter().all(|s| s.games > 0));
    }

    #[test]
    fn undefined_xg_excluded_from_mean_only() {
        let mut blank = game("STL", 2, Some(0), 50.0, 1, 0);
        blank.xg_pct = None;
        let games = vec![game("STL", 1, Some(0), 40.0, 0, 1), blank];
        let row = &summarize_rest_buckets(&games)[0];
        assert_eq!(row.games, 2);
        assert!((row.mean_xg_pct.unwrap() - 40.0).abs() < EPS);
        assert!((row.win_rate - 0.5).abs() < EPS);
    }

    #[test]
    fn all_undefined_xg_gives_none() {
        let mut blank = game("STL", 2, Some(1), 50.0, 1, 0);
        blank.xg_pct = None;
        let row = &summarize_rest_buckets(&[blank])[0];
        assert_eq!(row.mean_xg_pct, None);
    }

    #[test]
    fn league_wide_summary_has_no_team() {
        let games = vec![
            game("STL", 1, Some(0), 45.0, 2, 3),
            game("BOS", 1, Some(0), 55.0, 3, 2),
        ];
        let summary = summarize_rest_buckets(&games);
        assert_eq!(summary[0].team, None);
        assert_eq!(summary[0].games, 2);
    }

    #[test]
    fn summarizing_twice_is_identical() {
        let games = vec![
            game("STL", 1, Some(0), 45.0, 2, 3),
            game("STL", 4, Some(2), 51.0, 3, 3),
            game("STL", 9, Some(4), 58.0, 5, 1),
        ];
        assert_eq!(summarize_rest_buckets(&games), summarize_rest_buckets(&games));
    }

    #[test]
    fn empty_table_gives_empty_summary() {
        assert!(summarize_rest_buckets(&[]).is_empty());
    }

    #[test]
    fn explicit_team_bucket_requires_games() {
        let games = vec![game("STL", 1, Some(0), 45.0, 2, 3)];
        let row = summarize_team_bucket(&games, "STL", RestBucket::Zero).unwrap();
        assert_eq!(row.games, 1);

        let err = summarize_team_bucket(&games, "STL", RestBucket::ThreePlus).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData(_)));
        let err = summarize_team_bucket(&games, "BOS", RestBucket::Zero).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData(_)));
    }
}
