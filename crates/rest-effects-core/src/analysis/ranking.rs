// Team fatigue ranking: how much a team's xG% drops on zero rest.

use crate::analysis::mean;
use crate::games::record::{GameRecord, RestBucket};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Rested-vs-tired expected goal share for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FatigueRanking {
    pub team: String,
    /// Mean xG% with 3+ days of rest.
    pub rested_xg_pct: f64,
    /// Mean xG% on zero rest.
    pub tired_xg_pct: f64,
    /// `rested_xg_pct - tired_xg_pct`.
    pub fatigue_score: f64,
    pub rested_games: usize,
    pub tired_games: usize,
}

#[derive(Default)]
struct Endpoints {
    rested: Vec<f64>,
    tired: Vec<f64>,
}

/// Rank every team by fatigue score, ascending, ties broken by team code.
/// The first row is the team whose xG% drops least (or rises) on zero rest;
/// the hardest-hit teams come last.
///
/// A team needs at least one game with a defined xG% in both the `3+` and
/// the `0` bucket; teams missing either are left out rather than scored 0.
pub fn rank_rest_sensitivity(games: &[GameRecord]) -> Vec<FatigueRanking> {
    let mut by_team: BTreeMap<&str, Endpoints> = BTreeMap::new();
    for game in games {
        let entry = by_team.entry(game.team.as_str()).or_default();
        let Some(xg) = game.xg_pct else {
            continue;
        };
        match game.rest_bucket {
            Some(RestBucket::ThreePlus) => entry.rested.push(xg),
            Some(RestBucket::Zero) => entry.tired.push(xg),
            _ => {}
        }
    }

    let mut rankings: Vec<FatigueRanking> = by_team
        .into_iter()
        .filter_map(|(team, endpoints)| {
            let (Some(rested), Some(tired)) = (
                mean(endpoints.rested.iter().copied()),
                mean(endpoints.tired.iter().copied()),
            ) else {
                debug!("{team} lacks rested or zero-rest games, excluded from ranking");
                return None;
            };
            Some(FatigueRanking {
                team: team.to_string(),
                rested_xg_pct: rested,
                tired_xg_pct: tired,
                fatigue_score: rested - tired,
                rested_games: endpoints.rested.len(),
                tired_games: endpoints.tired.len(),
            })
        })
        .collect();

    rankings.sort_by(|a, b| {
        a.fatigue_score
            .partial_cmp(&b.fatigue_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.team.cmp(&b.team))
    });
    rankings
}
