// Integration tests for the rest-effects pipeline.
//
// These load the MoneyPuck-format fixture through the public API and check
// that loading, bucketing, ranking, back-to-back pairing and chart building
// agree with hand-computed values.

use std::path::Path;

use rest_effects::games::loader::RowDefect;
use rest_effects::*;

const FIXTURE: &str = "tests/fixtures/all_teams.csv";
const EPS: f64 = 1e-9;

fn fixture_games() -> LoadedGames {
    load_rest_data(Path::new(FIXTURE)).expect("fixture should load")
}

fn team(games: &[GameRecord], code: &str) -> Vec<GameRecord> {
    GameFilter::team(code).apply(games)
}

#[test]
fn fixture_loads_with_scope_and_skips() {
    let loaded = fixture_games();
    assert_eq!(loaded.report.rows_read, 11);
    assert_eq!(loaded.report.out_of_scope, 1);
    assert_eq!(loaded.report.skipped_count(), 1);
    assert_eq!(
        loaded.report.skipped[0].reason,
        RowDefect::DataFormat("2023-13-45".into())
    );
    assert!(loaded.report.unmapped_teams.is_empty());
    assert_eq!(loaded.records.len(), 9);

    // "T.B" folded onto TBL, and records sorted by team then date.
    let teams: Vec<&str> = loaded.records.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(
        teams,
        vec!["STL", "STL", "STL", "STL", "STL", "STL", "TBL", "TBL", "TBL"]
    );
    assert_eq!(loaded.records[3].opponent, "TBL");
}

#[test]
fn rest_days_follow_calendar_gaps() {
    let loaded = fixture_games();
    let stl = team(&loaded.records, "STL");
    let rest: Vec<Option<u32>> = stl.iter().map(|g| g.rest_days).collect();
    assert_eq!(rest, vec![None, Some(0), Some(2), Some(0), Some(3), Some(1)]);
    for game in &loaded.records {
        assert_eq!(game.rest_bucket, game.rest_days.map(RestBucket::from_rest_days));
    }
}

#[test]
fn team_summary_matches_hand_computed_means() {
    let loaded = fixture_games();
    let stl = team(&loaded.records, "STL");
    let summary = summarize_rest_buckets(&stl);

    let buckets: Vec<RestBucket> = summary.iter().map(|s| s.bucket).collect();
    assert_eq!(buckets, RestBucket::ALL.to_vec());

    let zero = &summary[0];
    assert_eq!(zero.team.as_deref(), Some("STL"));
    assert_eq!(zero.games, 2);
    assert!((zero.mean_xg_pct.unwrap() - 47.8).abs() < EPS);
    assert!((zero.mean_goals_for - 1.5).abs() < EPS);
    assert!((zero.mean_goals_against - 3.5).abs() < EPS);
    assert!((zero.mean_goal_diff + 2.0).abs() < EPS);
    assert!((zero.win_rate - 0.0).abs() < EPS);

    // 2-2 tie on one day of rest counts as a loss.
    let one = &summary[1];
    assert_eq!(one.games, 1);
    assert!((one.win_rate - 0.0).abs() < EPS);

    assert_eq!(summarize_rest_buckets(&stl), summary);
}

#[test]
fn fatigue_ranking_orders_teams() {
    let loaded = fixture_games();
    let ranking = rank_rest_sensitivity(&loaded.records);
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].team, "STL");
    assert!((ranking[0].fatigue_score - 18.2).abs() < 1e-6);
    assert_eq!(ranking[1].team, "TBL");
    assert!((ranking[1].fatigue_score - 22.5).abs() < 1e-6);
}

#[test]
fn back_to_back_sets_for_one_team() {
    let loaded = fixture_games();
    let stl = team(&loaded.records, "STL");

    let pairs = get_back_to_back_pairs(&stl).unwrap();
    assert_eq!(pairs.len(), 2);
    assert!(pairs
        .iter()
        .all(|p| p.second.rest_bucket == Some(RestBucket::Zero)));

    let [game_one, game_two] = summarize_back_to_backs(&stl).unwrap();
    assert_eq!(game_one.games, 2);
    assert!((game_one.mean_xg_pct.unwrap() - 55.0).abs() < EPS);
    assert!((game_two.mean_xg_pct.unwrap() - 47.8).abs() < EPS);

    assert!(matches!(
        get_back_to_back_pairs(&loaded.records),
        Err(AnalysisError::MultipleTeams { .. })
    ));
}

#[test]
fn filtered_table_feeds_aggregation() {
    let loaded = fixture_games();
    let home = GameFilter::default()
        .with_venue(Venue::Home)
        .apply(&loaded.records);
    assert!(home.iter().all(|g| g.venue == Venue::Home));

    let summary = summarize_rest_buckets(&home);
    let total: usize = summary.iter().map(|s| s.games).sum();
    assert_eq!(total, home.iter().filter(|g| g.rest_bucket.is_some()).count());
}

#[test]
fn chart_overlays_team_on_league() {
    let loaded = fixture_games();
    let chart = plot_rest_performance(&loaded.records, "TBL", Metric::XgPct).unwrap();
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[1].name, "TBL");
    assert!((chart.series[1].points[0].unwrap() - 37.5).abs() < EPS);
    assert_eq!(chart.series[1].points[1], None);
    assert_eq!(chart.series[0].sample_sizes, vec![3, 1, 1, 2]);
}

#[test]
fn explicit_missing_combination_fails() {
    let loaded = fixture_games();
    let err = summarize_team_bucket(&loaded.records, "TBL", RestBucket::Two).unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientData(_)));
}

#[test]
fn in_memory_table_with_bad_date_is_not_fatal() {
    let csv_data = "\
playerTeam,gameDate,season,opposingTeam,home_or_away,xGoalsFor,xGoalsAgainst,goalsFor,goalsAgainst
STL,20231010,2023,DAL,HOME,2,2,1,0
STL,yesterday,2023,DAL,HOME,2,2,1,0";
    let loaded = load_rest_data_from_reader(csv_data.as_bytes(), &LoaderOptions::default()).unwrap();
    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.report.skipped_count(), 1);
}
