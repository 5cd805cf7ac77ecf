// Configuration loading and parsing (config/analysis.toml).

use crate::games::filter::GameFilter;
use crate::games::loader::LoaderOptions;
use crate::games::record::Venue;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "analysis.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// analysis.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub rolling: RollingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the team game log CSV, relative to the config base directory.
    pub path: String,
}

/// Which raw rows count as team-level game rows. An empty string disables
/// the corresponding check.
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default = "default_situation")]
    pub situation: String,
}

fn default_position() -> String {
    "Team Level".into()
}

fn default_situation() -> String {
    "all".into()
}

impl Default for ScopeConfig {
    fn default() -> Self {
        ScopeConfig {
            position: default_position(),
            situation: default_situation(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    pub season: Option<i32>,
    pub venue: Option<Venue>,
    pub min_year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RollingConfig {
    #[serde(default = "default_window")]
    pub window: usize,
}

fn default_window() -> usize {
    5
}

impl Default for RollingConfig {
    fn default() -> Self {
        RollingConfig {
            window: default_window(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// When set, reports are also written to this path as JSON.
    pub export_json: Option<String>,
}

impl Config {
    pub fn loader_options(&self) -> LoaderOptions {
        let non_empty = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        LoaderOptions {
            position: non_empty(&self.scope.position),
            situation: non_empty(&self.scope.situation),
        }
    }

    /// Season/venue/year filter from config; the team is chosen per report.
    pub fn game_filter(&self) -> GameFilter {
        GameFilter {
            team: None,
            season: self.filter.season,
            venue: self.filter.venue,
            min_year: self.filter.min_year,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/analysis.toml` relative to `base_dir`.
///
/// This does not copy defaults; prefer `load_config_in()` for the application.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/analysis.toml` into `config/` if no config exists yet.
/// Returns the path written, or `None` when the config was already there.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CONFIG_FILE} and no defaults/{CONFIG_FILE} in {}",
                base_dir.display()
            ),
        });
    }

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create config directory: {e}"),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", source.display()),
    })?;

    Ok(Some(target))
}

/// Load config relative to `base_dir`, copying defaults first.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.rolling.window == 0 {
        return Err(ConfigError::ValidationError {
            field: "rolling.window".into(),
            message: "must be greater than 0".into(),
        });
    }

    let year_fields: &[(&str, Option<i32>)] = &[
        ("filter.season", config.filter.season),
        ("filter.min_year", config.filter.min_year),
    ];
    for (name, val) in year_fields {
        if let Some(year) = val {
            if !(1917..=2100).contains(year) {
                return Err(ConfigError::ValidationError {
                    field: name.to_string(),
                    message: format!("must be a year between 1917 and 2100, got {year}"),
                });
            }
        }
    }

    if config
        .output
        .export_json
        .as_deref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: "output.export_json".into(),
            message: "must not be empty when set".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
