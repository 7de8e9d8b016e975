//! Canonical in-memory representation of a price bar (OHLC).
//!
//! Bars come either natively from a data provider or from
//! [`synthesize`](crate::synth::synthesize) when only closes are known.

use chrono::{DateTime, Utc};

/// Directional bias of a bar, used to colour a whole chart column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Close at or above open.
    Up,
    /// Close below open.
    Down,
}

/// A single price bar for one interval.
///
/// Bars handed to the rasterizer must satisfy
/// `low <= min(open, close)` and `high >= max(open, close)`; see
/// [`Bar::is_well_formed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Start of the interval (UTC). Unset when the source had no timestamp.
    pub timestamp: Option<DateTime<Utc>>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the interval.
    pub high: f64,

    /// Lowest price during the interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the interval. Not all sources supply this.
    pub volume: Option<u64>,
}

impl Bar {
    /// Creates an untimestamped bar without volume.
    pub const fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp: None,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Returns the bar with its timestamp set.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns the bar with its volume set.
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// `Up` when `close >= open`; a flat bar counts as up.
    pub fn direction(&self) -> Direction {
        if self.close >= self.open {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// True when all prices are finite and the high/low bound open and close.
    pub fn is_well_formed(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite())
            && self.low <= self.open.min(self.close)
            && self.high >= self.open.max(self.close)
    }
}
