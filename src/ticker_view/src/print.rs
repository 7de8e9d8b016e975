//! One-shot mode: fetch once and write the chart to a writer.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chart_core::{Palette, RenderError, render_candles_with, render_line_with};
use chrono::Local;
use quote_ingestor::DataProvider;
use tracing::info;

use crate::{
    app::{
        fetch::{ChartData, FetchRequest, load_chart},
        reducer::NO_DATAPOINTS,
        render::TITLE,
        state::ViewMode,
    },
    config::AppConfig,
};

/// Title, caption and plot as one block of text. No trailing newline.
pub fn render_report(
    data: &ChartData,
    view: ViewMode,
    width: usize,
    height: usize,
    palette: &Palette,
) -> Result<String, RenderError> {
    let plot = match view {
        ViewMode::Candles => render_candles_with(&data.bars, width, height, palette)?,
        ViewMode::Line => render_line_with(&data.close_prices(), width, height, palette)?,
    };
    let last = data.last_price().unwrap_or(f64::NAN);
    Ok(format!(
        "{TITLE}\n{}  {}/{}   last: {last:.2}   fetched: {}\n{plot}",
        data.symbol,
        data.range,
        data.interval,
        Local::now().format("%H:%M:%S"),
    ))
}

pub async fn run<W: Write>(
    provider: &dyn DataProvider,
    config: &AppConfig,
    width: usize,
    height: usize,
    out: &mut W,
) -> Result<()> {
    let request = FetchRequest {
        seq: 0,
        params: config.request.clone(),
        source: config.bar_source,
    };
    let data = load_chart(provider, &request)
        .await
        .with_context(|| format!("failed to fetch {}", config.request.symbol))?;
    if data.closes.len() < 2 {
        bail!(NO_DATAPOINTS);
    }
    info!(symbol = %data.symbol, closes = data.closes.len(), "rendering chart");

    let report = render_report(&data, config.view, width, height, &Palette::ansi())?;
    writeln!(out, "{report}")?;
    Ok(())
}
