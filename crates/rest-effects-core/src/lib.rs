// Library root: rest-day effects on NHL team performance.
//
// Raw game logs are loaded and enriched in `games`, aggregated in
// `analysis`, and turned into chart data in `chart`.

pub mod analysis;
pub mod chart;
pub mod config;
pub mod games;

pub use analysis::back_to_back::{
    compare_back_to_back_split, get_back_to_back_pairs, summarize_back_to_backs, BackToBackPair,
    BackToBackSummary,
};
pub use analysis::ranking::{rank_rest_sensitivity, FatigueRanking};
pub use analysis::rolling::{add_rolling_metrics, RollingPoint};
pub use analysis::summary::{summarize_rest_buckets, summarize_team_bucket, TeamRestSummary};
pub use analysis::AnalysisError;
pub use chart::{plot_rest_performance, ChartSpec, Metric};
pub use games::filter::GameFilter;
pub use games::loader::{
    load_rest_data, load_rest_data_from_reader, load_rest_data_with, LoadError, LoadReport,
    LoadedGames, LoaderOptions,
};
pub use games::record::{GameRecord, GameResult, RestBucket, Venue};
