// Trailing rolling averages over a team's game sequence.

use crate::analysis::{mean, AnalysisError};
use crate::games::record::GameRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Trailing means ending at one game. Values are `None` until the window
/// has filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingPoint {
    /// 1-based position in the date-ordered sequence.
    pub game_number: usize,
    pub game_date: NaiveDate,
    pub xgf: Option<f64>,
    pub xga: Option<f64>,
    pub xg_pct: Option<f64>,
    pub goals_for: Option<f64>,
    pub goals_against: Option<f64>,
}

/// Compute trailing `window`-game means of xGF, xGA, xG%, GF and GA.
///
/// Games are ordered by date first. The xG% mean skips games whose share
/// is undefined, and is `None` if every game in the window lacks one.
pub fn add_rolling_metrics(games: &[GameRecord], window: usize) -> Result<Vec<RollingPoint>, AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::InvalidWindow);
    }

    let mut sorted: Vec<&GameRecord> = games.iter().collect();
    sorted.sort_by_key(|g| g.game_date);

    let points = sorted
        .iter()
        .enumerate()
        .map(|(i, game)| {
            let filled = i + 1 >= window;
            let slice = &sorted[(i + 1).saturating_sub(window)..=i];
            let avg = |f: fn(&GameRecord) -> f64| {
                if filled {
                    mean(slice.iter().map(|g| f(g)))
                } else {
                    None
                }
            };
            RollingPoint {
                game_number: i + 1,
                game_date: game.game_date,
                xgf: avg(|g| g.xgf),
                xga: avg(|g| g.xga),
                xg_pct: if filled {
                    mean(slice.iter().filter_map(|g| g.xg_pct))
                } else {
                    None
                },
                goals_for: avg(|g| g.goals_for as f64),
                goals_against: avg(|g| g.goals_against as f64),
            }
        })
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::game;

    const EPS: f64 = 1e-9;

    #[test]
    fn window_zero_rejected() {
        let games = vec![game("STL", 0, None, 50.0, 2, 1)];
        assert_eq!(
            add_rolling_metrics(&games, 0),
            Err(AnalysisError::InvalidWindow)
        );
    }

    #[test]
    fn window_one_is_raw_values() {
        let games = vec![
            game("STL", 0, None, 50.0, 2, 1),
            game("STL", 2, Some(1), 40.0, 0, 3),
        ];
        let points = add_rolling_metrics(&games, 1).unwrap();
        assert_eq!(points.len(), 2);
        assert!((points[1].goals_against.unwrap() - 3.0).abs() < EPS);
        assert!((points[1].xg_pct.unwrap() - 40.0).abs() < EPS);
    }

    #[test]
    fn leading_points_are_empty_until_window_fills() {
        let games = vec![
            game("STL", 0, None, 50.0, 2, 1),
            game("STL", 2, Some(1), 40.0, 0, 3),
            game("STL", 4, Some(1), 60.0, 4, 2),
            game("STL", 5, Some(0), 30.0, 1, 1),
        ];
        let points = add_rolling_metrics(&games, 3).unwrap();
        assert_eq!(points[0].xg_pct, None);
        assert_eq!(points[1].goals_for, None);
        assert!((points[2].xg_pct.unwrap() - 50.0).abs() < EPS);
        assert!((points[2].goals_for.unwrap() - 2.0).abs() < EPS);
        assert!((points[3].xg_pct.unwrap() - 130.0 / 3.0).abs() < EPS);
        assert_eq!(points[3].game_number, 4);
    }

    #[test]
    fn points_follow_date_order() {
        let games = vec![
            game("STL", 5, Some(0), 30.0, 1, 1),
            game("STL", 0, None, 50.0, 2, 1),
        ];
        let points = add_rolling_metrics(&games, 1).unwrap();
        assert!(points[0].game_date < points[1].game_date);
    }
}
