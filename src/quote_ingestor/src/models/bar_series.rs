//! Fetched series for a specific symbol and interval.

use chart_core::{Bar, Sample};

use crate::models::timeframe::TimeFrame;

/// Native OHLC bars for a single symbol.
///
/// Groups the [`Bar`]s with their symbol and [`TimeFrame`], making the data
/// set self-describing.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g. "AAPL").
    pub symbol: String,
    /// The time interval for each bar in the series.
    pub interval: TimeFrame,
    /// Bars in chronological order.
    pub bars: Vec<Bar>,
}

/// Close-only observations for a single symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseSeries {
    pub symbol: String,
    pub interval: TimeFrame,
    /// Usable samples in chronological order.
    pub samples: Vec<Sample>,
}
