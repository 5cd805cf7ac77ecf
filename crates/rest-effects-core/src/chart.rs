// Chart specifications for rest-bucket performance.
//
// Rendering lives outside this crate; a `ChartSpec` is plain data that a
// front end can serialize to JSON and draw.

use crate::analysis::summary::{summarize_rest_buckets, TeamRestSummary};
use crate::analysis::AnalysisError;
use crate::games::record::{GameRecord, RestBucket};
use crate::games::teams::team_logo_url;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which per-bucket statistic to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    WinPct,
    XgPct,
    GoalDiff,
}

impl Metric {
    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::WinPct => "Win Percentage",
            Metric::XgPct => "Expected Goals %",
            Metric::GoalDiff => "Goal Differential",
        }
    }

    fn value(&self, row: &TeamRestSummary) -> Option<f64> {
        match self {
            Metric::WinPct => Some(row.win_pct()),
            Metric::XgPct => row.mean_xg_pct,
            Metric::GoalDiff => Some(row.mean_goal_diff),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::WinPct => "win-pct",
            Metric::XgPct => "xg-pct",
            Metric::GoalDiff => "goal-diff",
        })
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win-pct" | "win" | "win_pct" => Ok(Metric::WinPct),
            "xg-pct" | "xg" | "xg_pct" => Ok(Metric::XgPct),
            "goal-diff" | "gd" | "goal_diff" => Ok(Metric::GoalDiff),
            other => Err(format!("unknown metric `{other}` (expected win-pct, xg-pct or goal-diff)")),
        }
    }
}

/// One line on the chart. `points[i]` belongs to `ChartSpec::x_labels[i]`;
/// buckets the series has no games for are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Option<f64>>,
    pub sample_sizes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub metric: Metric,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_labels: Vec<&'static str>,
    pub series: Vec<Series>,
    pub logo_url: String,
}

fn series_for(name: String, summary: &[TeamRestSummary], metric: Metric) -> Series {
    let mut points = Vec::with_capacity(RestBucket::ALL.len());
    let mut sample_sizes = Vec::with_capacity(RestBucket::ALL.len());
    for bucket in RestBucket::ALL {
        let row = summary.iter().find(|r| r.bucket == bucket);
        points.push(row.and_then(|r| metric.value(r)));
        sample_sizes.push(row.map_or(0, |r| r.games));
    }
    Series {
        name,
        points,
        sample_sizes,
    }
}

/// Build a league-average line plus a team overlay for one metric across
/// the rest buckets.
pub fn plot_rest_performance(
    games: &[GameRecord],
    team: &str,
    metric: Metric,
) -> Result<ChartSpec, AnalysisError> {
    let team_games: Vec<GameRecord> = games.iter().filter(|g| g.team == team).cloned().collect();
    if team_games.is_empty() {
        return Err(AnalysisError::InsufficientData(format!("team {team}")));
    }

    let league = summarize_rest_buckets(games);
    let team_summary = summarize_rest_buckets(&team_games);

    Ok(ChartSpec {
        title: format!("{team}: {} by Rest Days", metric.axis_label()),
        metric,
        x_label: "Rest Days",
        y_label: metric.axis_label(),
        x_labels: RestBucket::ALL.iter().map(|b| b.label()).collect(),
        series: vec![
            series_for("League Avg".into(), &league, metric),
            series_for(team.to_string(), &team_summary, metric),
        ],
        logo_url: team_logo_url(team),
    })
}
