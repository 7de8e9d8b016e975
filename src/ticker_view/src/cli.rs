use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use quote_ingestor::{ChartRange, TimeFrame};

use crate::app::{fetch::BarSource, state::ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Interactive full-screen chart
    #[default]
    Tui,
    /// Fetch once and print the chart to stdout
    Print,
}

/// Flags override the config file and `TICKER_FORGE_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "ticker-forge", version, about = "Terminal stock chart viewer")]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = Mode::Tui)]
    pub mode: Mode,

    /// Ticker symbol (e.g. AAPL, BRK-B, ^GSPC)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Lookback range: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, ytd, max
    #[arg(short, long)]
    pub range: Option<ChartRange>,

    /// Bar interval: 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo
    #[arg(short, long)]
    pub interval: Option<TimeFrame>,

    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,

    /// Where candle bars come from
    #[arg(long, value_enum)]
    pub bars: Option<BarSource>,

    /// Auto-refresh period in seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub refresh: Option<u64>,

    /// Output width for print mode (defaults to the terminal width)
    #[arg(long)]
    pub width: Option<u16>,

    /// Output height for print mode (defaults to the terminal height)
    #[arg(long)]
    pub height: Option<u16>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log file used in TUI mode
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
