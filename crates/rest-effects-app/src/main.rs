// nhl-rest: command-line reports on rest-day effects.
//
// Startup sequence:
// 1. Parse arguments, initialize tracing
// 2. Load config (copying defaults on first run)
// 3. Load and enrich the game log
// 4. Apply the season/venue/year filter
// 5. Run the requested report and print it (table or JSON)

mod report;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rest_effects::config;
use rest_effects::{
    add_rolling_metrics, compare_back_to_back_split, load_rest_data_with, plot_rest_performance,
    rank_rest_sensitivity, summarize_back_to_backs, summarize_rest_buckets, GameFilter,
    GameRecord, Metric, Venue,
};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "nhl-rest")]
#[command(about = "Rest-day effects on NHL team performance", long_about = None)]
struct Cli {
    /// Directory containing config/ (and defaults/)
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Override the game log CSV path from config
    #[arg(long)]
    data: Option<PathBuf>,

    /// Only games from this season
    #[arg(long)]
    season: Option<i32>,

    /// Only home or away games
    #[arg(long, value_parser = parse_venue)]
    venue: Option<Venue>,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Also log to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Performance by rest bucket, league-wide or for one team
    Summary {
        #[arg(long)]
        team: Option<String>,
    },
    /// Teams ranked by xG% drop from 3+ days rest to zero rest
    Ranking,
    /// First vs second game of a team's back-to-back sets
    BackToBack {
        #[arg(long)]
        team: String,
    },
    /// Back-to-back games vs all other games
    Split {
        #[arg(long)]
        team: Option<String>,
    },
    /// Rolling averages over a team's schedule
    Rolling {
        #[arg(long)]
        team: String,
        /// Override the window from config
        #[arg(long)]
        window: Option<usize>,
    },
    /// Chart specification (JSON) for one team against the league
    Chart {
        #[arg(long)]
        team: String,
        #[arg(long, default_value = "xg-pct")]
        metric: Metric,
    },
}

fn parse_venue(s: &str) -> Result<Venue, String> {
    Venue::from_str_venue(s).ok_or_else(|| format!("unknown venue `{s}` (expected home or away)"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;
    info!("nhl-rest starting up");

    let config = config::load_config_in(&cli.config_dir).context("failed to load configuration")?;

    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| cli.config_dir.join(&config.data.path));
    let loaded = load_rest_data_with(&data_path, &config.loader_options())
        .with_context(|| format!("failed to load game data from {}", data_path.display()))?;
    eprint!("{}", report::format_load_report(&loaded.report, loaded.records.len()));

    let mut filter = config.game_filter();
    if let Some(season) = cli.season {
        filter = filter.with_season(season);
    }
    if let Some(venue) = cli.venue {
        filter = filter.with_venue(venue);
    }
    let games = filter.apply(&loaded.records);
    info!("{} games after filtering", games.len());
    if games.is_empty() {
        bail!("no games match the configured filter");
    }

    let export = config.output.export_json.as_deref().map(Path::new);

    match cli.command {
        Commands::Summary { team } => {
            let scoped = scope_to_team(&games, team.as_deref())?;
            let rows = summarize_rest_buckets(&scoped);
            emit(cli.json, export, &rows, || report::format_summary_table(&rows))?;
        }
        Commands::Ranking => {
            let rows = rank_rest_sensitivity(&games);
            emit(cli.json, export, &rows, || report::format_ranking_table(&rows))?;
        }
        Commands::BackToBack { team } => {
            let scoped = scope_to_team(&games, Some(team.as_str()))?;
            let rows = summarize_back_to_backs(&scoped)?;
            emit(cli.json, export, &rows, || report::format_back_to_back_table(&rows))?;
        }
        Commands::Split { team } => {
            let scoped = scope_to_team(&games, team.as_deref())?;
            let rows = compare_back_to_back_split(&scoped)?;
            emit(cli.json, export, &rows, || report::format_back_to_back_table(&rows))?;
        }
        Commands::Rolling { team, window } => {
            let scoped = scope_to_team(&games, Some(team.as_str()))?;
            let points = add_rolling_metrics(&scoped, window.unwrap_or(config.rolling.window))?;
            emit(cli.json, export, &points, || report::format_rolling_table(&points))?;
        }
        Commands::Chart { team, metric } => {
            let code = rest_effects::games::teams::normalize_team(&team).into_code();
            let chart = plot_rest_performance(&games, &code, metric)?;
            emit(true, export, &chart, String::new)?;
        }
    }

    info!("nhl-rest finished");
    Ok(())
}

fn scope_to_team(games: &[GameRecord], team: Option<&str>) -> anyhow::Result<Vec<GameRecord>> {
    let Some(team) = team else {
        return Ok(games.to_vec());
    };
    let code = rest_effects::games::teams::normalize_team(team).into_code();
    let scoped = GameFilter::team(code.as_str()).apply(games);
    if scoped.is_empty() {
        bail!("no games found for team {code}");
    }
    Ok(scoped)
}

/// Print `value` as JSON or as the table built by `table`, and write the
/// JSON export when one is configured.
fn emit<T: Serialize>(
    json: bool,
    export: Option<&Path>,
    value: &T,
    table: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    if json {
        println!("{rendered}");
    } else {
        print!("{}", table());
    }

    if let Some(path) = export {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, &rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Report exported to {}", path.display());
    }
    Ok(())
}

/// Initialize tracing to log to `logs/nhl-rest.log`, and to stderr as well
/// when `verbose` is set.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("nhl-rest.log"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rest_effects=info,nhl_rest=info,warn"));

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);
    let stderr_layer = verbose.then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to set tracing subscriber")?;

    Ok(())
}
