//! A single observed price point.

use chrono::{DateTime, Utc};

/// One (timestamp, price) observation as reported by a data source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Observation time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Observed price.
    pub price: f64,
}

impl Sample {
    /// Creates a sample.
    pub const fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// A zero, NaN or infinite price marks a missing observation.
    pub fn is_usable(&self) -> bool {
        self.price.is_finite() && self.price != 0.0
    }
}
