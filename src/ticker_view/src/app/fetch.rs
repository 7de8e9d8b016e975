//! Loading chart data through a [`DataProvider`].

use chart_core::{Bar, Sample, synthesize_samples};
use clap::ValueEnum;
use quote_ingestor::{ChartRange, ChartRequestParams, DataProvider, ProviderError, TimeFrame};
use serde::Deserialize;
use tracing::debug;

/// Where candle bars come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BarSource {
    /// Built from consecutive closes (previous close becomes the open).
    #[default]
    Synthesized,
    /// OHLC as reported by the provider.
    Native,
}

/// One fetch the terminal loop should run. `seq` identifies the newest
/// request so late answers to older ones can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub params: ChartRequestParams,
    pub source: BarSource,
}

/// Everything a frame needs to plot one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub symbol: String,
    pub range: ChartRange,
    pub interval: TimeFrame,
    pub closes: Vec<Sample>,
    pub bars: Vec<Bar>,
}

impl ChartData {
    pub fn last_price(&self) -> Option<f64> {
        self.closes.last().map(|s| s.price)
    }

    pub fn close_prices(&self) -> Vec<f64> {
        self.closes.iter().map(|s| s.price).collect()
    }
}

pub async fn load_chart(
    provider: &dyn DataProvider,
    request: &FetchRequest,
) -> Result<ChartData, ProviderError> {
    let params = &request.params;
    let (closes, bars) = match request.source {
        BarSource::Synthesized => {
            let series = provider.fetch_closes(params).await?;
            let bars = synthesize_samples(&series.samples);
            (series.samples, bars)
        }
        BarSource::Native => {
            let series = provider.fetch_bars(params).await?;
            let closes = series
                .bars
                .iter()
                .filter_map(|b| b.timestamp.map(|t| Sample::new(t, b.close)))
                .collect();
            (closes, series.bars)
        }
    };
    debug!(seq = request.seq, closes = closes.len(), bars = bars.len(), "chart loaded");

    Ok(ChartData {
        symbol: params.symbol.clone(),
        range: params.range,
        interval: params.interval,
        closes,
        bars,
    })
}
