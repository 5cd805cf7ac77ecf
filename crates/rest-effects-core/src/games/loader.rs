// Game log loading, cleaning and rest-day enrichment.
//
// Reads MoneyPuck-format team game logs: one row per team per game per
// situation, with expected goals and actual goals for both sides.

use crate::games::record::{xg_share, GameRecord, GameResult, RestBucket, Venue};
use crate::games::teams::normalize_team;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "playerTeam",
    "gameDate",
    "season",
    "opposingTeam",
    "home_or_away",
    "xGoalsFor",
    "xGoalsAgainst",
    "goalsFor",
    "goalsAgainst",
];

/// Accepted date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y%m%d", "%Y-%m-%d"];

// ---------------------------------------------------------------------------
// Error and report types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input is missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("no usable game rows after cleaning ({rows_read} rows read, {skipped} skipped)")]
    EmptyInput { rows_read: usize, skipped: usize },
}

/// Why a single row was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowDefect {
    #[error("unparseable date `{0}`")]
    DataFormat(String),

    #[error("unknown home/away value `{0}`")]
    Venue(String),

    #[error("invalid value for {field}: {value}")]
    Numeric { field: &'static str, value: String },

    #[error("malformed row: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the source, when known.
    pub line: Option<u64>,
    pub reason: RowDefect,
}

/// Counts of what happened to the input rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub rows_read: usize,
    /// Rows dropped by the position/situation scope (not defects).
    pub out_of_scope: usize,
    pub skipped: Vec<SkippedRow>,
    /// Raw team codes that were not recognised by the alias table.
    pub unmapped_teams: BTreeSet<String>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Cleaned table plus the report describing what was dropped.
#[derive(Debug, Clone)]
pub struct LoadedGames {
    /// Sorted by `(team, game_date)`.
    pub records: Vec<GameRecord>,
    pub report: LoadReport,
}

/// Row scoping applied before cleaning. A `None` value disables that check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    pub position: Option<String>,
    pub situation: Option<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions {
            position: Some("Team Level".into()),
            situation: Some("all".into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed rows
// ---------------------------------------------------------------------------

/// A parsed row before per-team enrichment (rest days, bucket).
#[derive(Debug, Clone, PartialEq)]
pub struct RawGame {
    pub team: String,
    pub team_flagged: bool,
    pub game_date: NaiveDate,
    pub season: i32,
    pub opponent: String,
    pub venue: Venue,
    pub xgf: f64,
    pub xga: f64,
    pub goals_for: u32,
    pub goals_against: u32,
}

/// MoneyPuck CSV row. Extra columns are ignored by the deserializer.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawGameRow {
    playerTeam: String,
    gameDate: String,
    season: i32,
    opposingTeam: String,
    home_or_away: String,
    xGoalsFor: f64,
    xGoalsAgainst: f64,
    goalsFor: f64,
    goalsAgainst: f64,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    situation: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a game date in any of the accepted layouts.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Goals are whole, non-negative counts; `2.5` is a defect, not `3`.
fn goal_count(field: &'static str, value: f64) -> Result<u32, RowDefect> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(RowDefect::Numeric {
            field,
            value: value.to_string(),
        });
    }
    Ok(value as u32)
}

fn expected_goals(field: &'static str, value: f64) -> Result<f64, RowDefect> {
    if !value.is_finite() || value < 0.0 {
        return Err(RowDefect::Numeric {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn in_scope(row: &RawGameRow, options: &LoaderOptions) -> bool {
    let matches = |wanted: &Option<String>, actual: &Option<String>| match (wanted, actual) {
        (Some(w), Some(a)) => a.trim().eq_ignore_ascii_case(w),
        _ => true,
    };
    matches(&options.position, &row.position) && matches(&options.situation, &row.situation)
}

fn clean_row(row: RawGameRow, report: &mut LoadReport) -> Result<RawGame, RowDefect> {
    let game_date =
        parse_game_date(&row.gameDate).ok_or_else(|| RowDefect::DataFormat(row.gameDate.clone()))?;
    let venue = Venue::from_str_venue(&row.home_or_away)
        .ok_or_else(|| RowDefect::Venue(row.home_or_away.clone()))?;
    let xgf = expected_goals("xGoalsFor", row.xGoalsFor)?;
    let xga = expected_goals("xGoalsAgainst", row.xGoalsAgainst)?;
    let goals_for = goal_count("goalsFor", row.goalsFor)?;
    let goals_against = goal_count("goalsAgainst", row.goalsAgainst)?;

    let team = normalize_team(&row.playerTeam);
    let team_flagged = team.is_flagged();
    if team_flagged {
        report.unmapped_teams.insert(row.playerTeam.trim().to_string());
    }

    Ok(RawGame {
        team: team.into_code(),
        team_flagged,
        game_date,
        season: row.season,
        opponent: normalize_team(&row.opposingTeam).into_code(),
        venue,
        xgf,
        xga,
        goals_for,
        goals_against,
    })
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Turn parsed rows into game records: sort each team's games by date and
/// derive rest days, rest bucket, xG%, goal differential and result.
///
/// Rest days are `days between games - 1`. A team's first game, and its first
/// game of each new season, has no rest value.
pub fn enrich(mut games: Vec<RawGame>) -> Vec<GameRecord> {
    games.sort_by(|a, b| a.team.cmp(&b.team).then(a.game_date.cmp(&b.game_date)));

    let mut records = Vec::with_capacity(games.len());
    let mut previous: Option<(String, i32, NaiveDate)> = None;

    for game in games {
        let rest_days = match &previous {
            Some((team, season, date)) if *team == game.team && *season == game.season => {
                let gap = (game.game_date - *date).num_days();
                if gap <= 0 {
                    warn!(
                        "{} has more than one game on {}, treating as zero rest",
                        game.team, game.game_date
                    );
                }
                Some((gap - 1).max(0) as u32)
            }
            _ => None,
        };
        previous = Some((game.team.clone(), game.season, game.game_date));

        let goal_diff = game.goals_for as i32 - game.goals_against as i32;
        records.push(GameRecord {
            xg_pct: xg_share(game.xgf, game.xga),
            result: GameResult::from_score(game.goals_for, game.goals_against),
            rest_bucket: rest_days.map(RestBucket::from_rest_days),
            team: game.team,
            team_flagged: game.team_flagged,
            game_date: game.game_date,
            season: game.season,
            opponent: game.opponent,
            venue: game.venue,
            xgf: game.xgf,
            xga: game.xga,
            goals_for: game.goals_for,
            goals_against: game.goals_against,
            goal_diff,
            rest_days,
        });
    }

    records
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Load and enrich game records from any reader (in-memory tables, tests).
pub fn load_rest_data_from_reader<R: Read>(
    rdr: R,
    options: &LoaderOptions,
) -> Result<LoadedGames, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(rdr);
    let headers = reader.headers()?.clone();

    if headers.is_empty() {
        return Err(LoadError::EmptyInput {
            rows_read: 0,
            skipped: 0,
        });
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Schema { missing });
    }

    let mut report = LoadReport::default();
    let mut games = Vec::new();

    for result in reader.records() {
        report.rows_read += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line());
                warn!("skipping unreadable row: {}", e);
                report.skipped.push(SkippedRow {
                    line,
                    reason: RowDefect::Malformed(e.to_string()),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line());

        let row: RawGameRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                warn!("skipping malformed game row at line {:?}: {}", line, e);
                report.skipped.push(SkippedRow {
                    line,
                    reason: RowDefect::Malformed(e.to_string()),
                });
                continue;
            }
        };

        if !in_scope(&row, options) {
            report.out_of_scope += 1;
            continue;
        }

        match clean_row(row, &mut report) {
            Ok(game) => games.push(game),
            Err(reason) => {
                warn!("skipping game row at line {:?}: {}", line, reason);
                report.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    if games.is_empty() {
        return Err(LoadError::EmptyInput {
            rows_read: report.rows_read,
            skipped: report.skipped_count(),
        });
    }

    if !report.unmapped_teams.is_empty() {
        warn!(
            "unrecognised team codes passed through unchanged: {:?}",
            report.unmapped_teams
        );
    }
    debug!(
        "{} rows read, {} out of scope, {} skipped",
        report.rows_read,
        report.out_of_scope,
        report.skipped_count()
    );

    Ok(LoadedGames {
        records: enrich(games),
        report,
    })
}

/// Load game records from a CSV file with the default row scope
/// (`Team Level` rows, `all` situation).
pub fn load_rest_data(path: &Path) -> Result<LoadedGames, LoadError> {
    load_rest_data_with(path, &LoaderOptions::default())
}

/// Load game records from a CSV file with explicit row scoping.
pub fn load_rest_data_with(path: &Path, options: &LoaderOptions) -> Result<LoadedGames, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let loaded = load_rest_data_from_reader(file, options)?;
    info!(
        "Loaded {} game records from {} ({} rows skipped)",
        loaded.records.len(),
        path.display(),
        loaded.report.skipped_count()
    );
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
