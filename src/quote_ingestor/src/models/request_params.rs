use thiserror::Error;

use crate::models::{range::ChartRange, timeframe::TimeFrame};

/// Longest symbol accepted, matching the ticker input field.
pub const MAX_SYMBOL_LEN: usize = 16;

pub const DEFAULT_SYMBOL: &str = "AAPL";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol is empty")]
    Empty,

    #[error("symbol is {len} characters long (max {MAX_SYMBOL_LEN})")]
    TooLong { len: usize },

    #[error("invalid character {ch:?} in symbol")]
    InvalidChar { ch: char },
}

/// Trims and upper-cases `raw`, then checks it only holds letters, digits
/// and `.`, `-`, `^`, `=` (index and FX tickers such as `^GSPC` or `EURUSD=X`).
pub fn normalize_symbol(raw: &str) -> Result<String, SymbolError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(SymbolError::Empty);
    }
    let len = symbol.chars().count();
    if len > MAX_SYMBOL_LEN {
        return Err(SymbolError::TooLong { len });
    }
    if let Some(ch) = symbol
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
    {
        return Err(SymbolError::InvalidChar { ch });
    }
    Ok(symbol)
}

/// Vendor-agnostic parameters for one chart request.
///
/// The symbol is always stored normalized; build values through
/// [`ChartRequestParams::new`] rather than the struct literal when the
/// symbol comes from user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartRequestParams {
    /// Upper-case ticker, e.g. `AAPL`, `BRK-B`, `^GSPC`.
    pub symbol: String,
    /// Lookback window.
    pub range: ChartRange,
    /// Interval per bar.
    pub interval: TimeFrame,
}

impl ChartRequestParams {
    pub fn new(symbol: &str, range: ChartRange, interval: TimeFrame) -> Result<Self, SymbolError> {
        Ok(Self {
            symbol: normalize_symbol(symbol)?,
            range,
            interval,
        })
    }
}

impl Default for ChartRequestParams {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            range: ChartRange::default(),
            interval: TimeFrame::default(),
        }
    }
}
