// Back-to-back sets: games played on consecutive days by the same team.

use crate::analysis::{mean, AnalysisError};
use crate::games::record::{GameRecord, RestBucket};
use serde::Serialize;
use std::collections::BTreeSet;

/// Two consecutive games for one team where the second came on zero rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackToBackPair {
    pub first: GameRecord,
    pub second: GameRecord,
}

/// Mean performance over one side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackToBackSummary {
    pub label: &'static str,
    pub games: usize,
    pub mean_xg_pct: Option<f64>,
    pub mean_xgf: f64,
    pub mean_xga: f64,
    pub mean_goals_for: f64,
    pub mean_goals_against: f64,
    pub mean_goal_diff: f64,
    pub win_rate: f64,
}

pub const GAME_ONE: &str = "Game 1";
pub const GAME_TWO: &str = "Game 2";
pub const NON_B2B: &str = "Non-B2B";
pub const B2B: &str = "Back-to-Back";

fn summarize_side<'a, I>(label: &'static str, games: I) -> BackToBackSummary
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let games: Vec<&GameRecord> = games.into_iter().collect();
    let mean_of = |f: fn(&GameRecord) -> f64| mean(games.iter().map(|g| f(g))).unwrap_or(0.0);
    BackToBackSummary {
        label,
        games: games.len(),
        mean_xg_pct: mean(games.iter().filter_map(|g| g.xg_pct)),
        mean_xgf: mean_of(|g| g.xgf),
        mean_xga: mean_of(|g| g.xga),
        mean_goals_for: mean_of(|g| g.goals_for as f64),
        mean_goals_against: mean_of(|g| g.goals_against as f64),
        mean_goal_diff: mean_of(|g| g.goal_diff as f64),
        win_rate: mean_of(|g| if g.result.is_win() { 1.0 } else { 0.0 }),
    }
}

fn ensure_single_team(games: &[GameRecord]) -> Result<(), AnalysisError> {
    let teams: BTreeSet<&str> = games.iter().map(|g| g.team.as_str()).collect();
    if teams.len() > 1 {
        return Err(AnalysisError::MultipleTeams {
            teams: teams.into_iter().map(String::from).collect(),
        });
    }
    Ok(())
}

/// Scan a single team's games in date order and return every adjacent pair
/// whose second game was played on zero rest.
///
/// Rest is computed on the full schedule, so on a filtered table (home games
/// only, say) two neighbouring rows may not be consecutive games. A pair also
/// requires the two dates to be at most one day apart.
pub fn get_back_to_back_pairs(games: &[GameRecord]) -> Result<Vec<BackToBackPair>, AnalysisError> {
    ensure_single_team(games)?;

    let mut sorted: Vec<&GameRecord> = games.iter().collect();
    sorted.sort_by_key(|g| g.game_date);

    Ok(sorted
        .windows(2)
        .filter(|w| w[1].rest_bucket == Some(RestBucket::Zero))
        .filter(|w| (w[1].game_date - w[0].game_date).num_days() <= 1)
        .map(|w| BackToBackPair {
            first: w[0].clone(),
            second: w[1].clone(),
        })
        .collect())
}

/// Compare the first and second games of a team's back-to-back sets.
///
/// Returns `[Game 1, Game 2]`; fails when the team has no back-to-backs.
pub fn summarize_back_to_backs(games: &[GameRecord]) -> Result<[BackToBackSummary; 2], AnalysisError> {
    let pairs = get_back_to_back_pairs(games)?;
    if pairs.is_empty() {
        let team = games.first().map_or("empty table", |g| g.team.as_str());
        return Err(AnalysisError::InsufficientData(format!(
            "back-to-back sets for {team}"
        )));
    }
    Ok([
        summarize_side(GAME_ONE, pairs.iter().map(|p| &p.first)),
        summarize_side(GAME_TWO, pairs.iter().map(|p| &p.second)),
    ])
}

/// Compare zero-rest games against all other games with a known rest value.
///
/// Returns `[Non-B2B, Back-to-Back]`. Works on single-team or league tables.
pub fn compare_back_to_back_split(games: &[GameRecord]) -> Result<[BackToBackSummary; 2], AnalysisError> {
    let (b2b, rested): (Vec<&GameRecord>, Vec<&GameRecord>) = games
        .iter()
        .filter(|g| g.rest_bucket.is_some())
        .partition(|g| g.rest_bucket == Some(RestBucket::Zero));

    if b2b.is_empty() || rested.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "back-to-back and rested games to compare".into(),
        ));
    }
    Ok([summarize_side(NON_B2B, rested), summarize_side(B2B, b2b)])
}
