use chart_core::{Bar, Sample, clean_samples};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::providers::{ApiSnafu, NoDataSnafu, ProviderError};

#[derive(Deserialize, Debug)]
pub struct YahooChartResponse {
    pub chart: YahooChart,
}

#[derive(Deserialize, Debug)]
pub struct YahooChart {
    #[serde(default)]
    pub result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    pub error: Option<YahooChartError>,
}

#[derive(Deserialize, Debug)]
pub struct YahooChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct YahooChartResult {
    pub meta: YahooMeta,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: YahooIndicators,
}

#[derive(Deserialize, Debug)]
pub struct YahooMeta {
    pub symbol: String,
}

#[derive(Deserialize, Debug)]
pub struct YahooIndicators {
    #[serde(default)]
    pub quote: Vec<YahooQuote>,
}

/// Parallel arrays indexed like `timestamp`; gaps come through as `null`.
#[derive(Deserialize, Debug, Default)]
pub struct YahooQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl YahooChartResponse {
    /// The first chart result, or the vendor's error.
    pub fn into_result(self, symbol: &str) -> Result<YahooChartResult, ProviderError> {
        if let Some(err) = self.chart.error {
            return ApiSnafu {
                message: format!("{}: {}", err.code, err.description),
            }
            .fail();
        }
        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .filter(|r| !r.indicators.quote.is_empty());
        match result {
            Some(result) => Ok(result),
            None => NoDataSnafu { symbol }.fail(),
        }
    }
}

impl YahooChartResult {
    fn quote(&self) -> Option<&YahooQuote> {
        self.indicators.quote.first()
    }

    fn timestamps(&self) -> impl Iterator<Item = (usize, DateTime<Utc>)> + '_ {
        self.timestamp
            .iter()
            .flatten()
            .enumerate()
            .filter_map(|(i, &secs)| DateTime::from_timestamp(secs, 0).map(|t| (i, t)))
    }

    /// Close samples with null, zero and NaN closes removed.
    pub fn close_samples(&self) -> Vec<Sample> {
        let Some(quote) = self.quote() else {
            return Vec::new();
        };
        let raw = self.timestamps().filter_map(|(i, t)| {
            // a null close is the same missing observation as a zero one
            let price = quote.close.get(i).copied().flatten().unwrap_or(0.0);
            (i < quote.close.len()).then(|| Sample::new(t, price))
        });
        clean_samples(raw)
    }

    /// Native OHLC bars. Entries with a missing or unusable price, or whose
    /// high/low do not bound open/close, are discarded.
    pub fn bars(&self) -> Vec<Bar> {
        let Some(quote) = self.quote() else {
            return Vec::new();
        };
        let field = |values: &[Option<f64>], i: usize| {
            values
                .get(i)
                .copied()
                .flatten()
                .filter(|p| p.is_finite() && *p != 0.0)
        };

        let mut discarded = 0usize;
        let mut bars = Vec::new();
        for (i, t) in self.timestamps() {
            let ohlc = (
                field(&quote.open, i),
                field(&quote.high, i),
                field(&quote.low, i),
                field(&quote.close, i),
            );
            let (Some(open), Some(high), Some(low), Some(close)) = ohlc else {
                discarded += 1;
                continue;
            };
            let mut bar = Bar::new(open, high, low, close).with_timestamp(t);
            if let Some(volume) = quote.volume.get(i).copied().flatten() {
                bar = bar.with_volume(volume);
            }
            if bar.is_well_formed() {
                bars.push(bar);
            } else {
                discarded += 1;
            }
        }
        if discarded > 0 {
            warn!(
                symbol = %self.meta.symbol,
                discarded,
                kept = bars.len(),
                "discarded incomplete or malformed bars"
            );
        }
        bars
    }
}
