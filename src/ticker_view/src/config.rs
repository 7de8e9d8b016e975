//! Layered configuration.
//!
//! Resolution order, later layers winning:
//! 1. built-in defaults (`AAPL`, `1d`, `1m`, line view, no auto-refresh)
//! 2. the TOML file given with `--config`
//! 3. `TICKER_FORGE_SYMBOL`, `TICKER_FORGE_RANGE`, `TICKER_FORGE_INTERVAL`,
//!    `TICKER_FORGE_REFRESH_SECS`
//! 4. command line flags
//!
//! Unknown keys in the file are rejected so a typo does not silently fall
//! back to a default.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use quote_ingestor::{
    ChartRange, ChartRequestParams, TimeFrame,
    models::request_params::{SymbolError, normalize_symbol},
};
use serde::Deserialize;
use shared_utils::env::{InvalidEnvVarError, get_env_var_opt, parse_var_with};
use thiserror::Error;

use crate::{
    app::{fetch::BarSource, state::ViewMode},
    cli::Cli,
};

pub const ENV_SYMBOL: &str = "TICKER_FORGE_SYMBOL";
pub const ENV_RANGE: &str = "TICKER_FORGE_RANGE";
pub const ENV_INTERVAL: &str = "TICKER_FORGE_INTERVAL";
pub const ENV_REFRESH_SECS: &str = "TICKER_FORGE_REFRESH_SECS";

const DEFAULT_LOG_FILE: &str = "ticker_forge.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Env(#[from] InvalidEnvVarError),

    #[error("invalid symbol: {0}")]
    Symbol(#[from] SymbolError),
}

/// Contents of the optional TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub symbol: Option<String>,
    pub range: Option<ChartRange>,
    pub interval: Option<TimeFrame>,
    pub view: Option<ViewMode>,
    pub bars: Option<BarSource>,
    pub refresh_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub yahoo_base_url: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub request: ChartRequestParams,
    pub view: ViewMode,
    pub bar_source: BarSource,
    /// `None` disables auto-refresh.
    pub refresh: Option<Duration>,
    pub log_file: PathBuf,
    /// Overrides the provider's default endpoint.
    pub yahoo_base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            request: ChartRequestParams::default(),
            view: ViewMode::default(),
            bar_source: BarSource::default(),
            refresh: None,
            log_file: default_log_file(),
            yahoo_base_url: None,
        }
    }
}

pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_FILE)
}

impl AppConfig {
    /// Resolves all layers against the process environment.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, get_env_var_opt, cli)
    }

    /// Resolves all layers with an explicit environment lookup.
    pub fn resolve<F>(file: FileConfig, env: F, cli: &Cli) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let symbol = cli
            .symbol
            .clone()
            .or_else(|| env(ENV_SYMBOL))
            .or(file.symbol)
            .unwrap_or(defaults.request.symbol);
        let range = match cli.range {
            Some(range) => range,
            None => parse_var_with(ENV_RANGE, &env)?
                .or(file.range)
                .unwrap_or(defaults.request.range),
        };
        let interval = match cli.interval {
            Some(interval) => interval,
            None => parse_var_with(ENV_INTERVAL, &env)?
                .or(file.interval)
                .unwrap_or(defaults.request.interval),
        };
        let refresh_secs = match cli.refresh {
            Some(secs) => Some(secs),
            None => parse_var_with::<u64, _>(ENV_REFRESH_SECS, &env)?.or(file.refresh_secs),
        };

        Ok(Self {
            request: ChartRequestParams {
                symbol: normalize_symbol(&symbol)?,
                range,
                interval,
            },
            view: cli.view.or(file.view).unwrap_or(defaults.view),
            bar_source: cli.bars.or(file.bars).unwrap_or(defaults.bar_source),
            refresh: refresh_secs.filter(|s| *s > 0).map(Duration::from_secs),
            log_file: cli.log_file.clone().or(file.log_file).unwrap_or(defaults.log_file),
            yahoo_base_url: file.yahoo_base_url,
        })
    }
}
