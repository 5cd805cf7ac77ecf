// Plain-text tables for the terminal.

use rest_effects::{
    BackToBackSummary, FatigueRanking, LoadReport, RollingPoint, TeamRestSummary,
};
use std::fmt::Write;

fn opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".into(),
    }
}

pub fn format_load_report(report: &LoadReport, records: usize) -> String {
    let mut out = format!(
        "{records} games loaded ({} rows read, {} out of scope, {} skipped)\n",
        report.rows_read,
        report.out_of_scope,
        report.skipped_count()
    );
    for row in &report.skipped {
        let line = row.line.map_or_else(|| "?".to_string(), |l| l.to_string());
        let _ = writeln!(out, "  line {line}: {}", row.reason);
    }
    if !report.unmapped_teams.is_empty() {
        let codes: Vec<&str> = report.unmapped_teams.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  unrecognised team codes: {}", codes.join(", "));
    }
    out
}

pub fn format_summary_table(rows: &[TeamRestSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "| {:<6} | {:>5} | {:>6} | {:>6} | {:>5} | {:>5} | {:>6} |",
        "Rest", "Games", "Win %", "xG %", "GF", "GA", "GD"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "| {:<6} | {:>5} | {:>6.1} | {:>6} | {:>5.2} | {:>5.2} | {:>+6.2} |",
            row.bucket.label(),
            row.games,
            row.win_pct(),
            opt(row.mean_xg_pct, 1),
            row.mean_goals_for,
            row.mean_goals_against,
            row.mean_goal_diff,
        );
    }
    out
}

/// Ranking table in ascending score order; the last column is the 3+ rest
/// xG% minus the zero-rest xG%.
pub fn format_ranking_table(rows: &[FatigueRanking]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "| {:>3} | {:<4} | {:>10} | {:>10} | {:>7} |",
        "#", "Team", "0-rest xG%", "3+ xG%", "3+ - 0"
    );
    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {:>3} | {:<4} | {:>10.1} | {:>10.1} | {:>+7.2} |",
            i + 1,
            row.team,
            row.tired_xg_pct,
            row.rested_xg_pct,
            row.fatigue_score,
        );
    }
    out
}

pub fn format_back_to_back_table(rows: &[BackToBackSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "| {:<12} | {:>5} | {:>6} | {:>5} | {:>5} | {:>5} | {:>5} | {:>6} |",
        "", "Games", "xG %", "xGF", "xGA", "GF", "GA", "Win %"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "| {:<12} | {:>5} | {:>6} | {:>5.2} | {:>5.2} | {:>5.2} | {:>5.2} | {:>6.1} |",
            row.label,
            row.games,
            opt(row.mean_xg_pct, 1),
            row.mean_xgf,
            row.mean_xga,
            row.mean_goals_for,
            row.mean_goals_against,
            row.win_rate * 100.0,
        );
    }
    out
}

pub fn format_rolling_table(points: &[RollingPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "| {:>4} | {:<10} | {:>5} | {:>5} | {:>6} | {:>5} | {:>5} |",
        "Game", "Date", "xGF", "xGA", "xG %", "GF", "GA"
    );
    for p in points {
        let _ = writeln!(
            out,
            "| {:>4} | {:<10} | {:>5} | {:>5} | {:>6} | {:>5} | {:>5} |",
            p.game_number,
            p.game_date.format("%Y-%m-%d").to_string(),
            opt(p.xgf, 2),
            opt(p.xga, 2),
            opt(p.xg_pct, 1),
            opt(p.goals_for, 2),
            opt(p.goals_against, 2),
        );
    }
    out
}
