use std::time::Duration;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use quote_ingestor::{ChartRequestParams, models::request_params::MAX_SYMBOL_LEN};
use serde::Deserialize;

use crate::{
    app::fetch::{BarSource, ChartData, FetchRequest},
    config::AppConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Connected close-price line
    #[default]
    Line,
    /// Coloured candlesticks
    Candles,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Line => ViewMode::Candles,
            ViewMode::Candles => ViewMode::Line,
        }
    }
}

/// The ticker being typed after `/`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickerInput {
    pub value: String,
    pub error: Option<String>,
}

impl TickerInput {
    pub fn new(initial: &str) -> Self {
        Self {
            value: initial.to_string(),
            error: None,
        }
    }

    /// Appends `ch` upper-cased when it may appear in a symbol.
    pub fn push(&mut self, ch: char) {
        if !(ch.is_alphanumeric() || matches!(ch, '.' | '-' | '^' | '=')) {
            self.error = Some(format!("invalid char: {ch:?}"));
            return;
        }
        if self.value.chars().count() >= MAX_SYMBOL_LEN {
            self.error = Some(format!("at most {MAX_SYMBOL_LEN} characters"));
            return;
        }
        self.value.extend(ch.to_uppercase());
        self.error = None;
    }

    pub fn pop(&mut self) {
        self.value.pop();
        self.error = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub request: ChartRequestParams,
    pub view: ViewMode,
    pub bar_source: BarSource,
    pub refresh_every: Option<Duration>,

    /// Terminal size in cells, `(0, 0)` until the first resize.
    pub size: (u16, u16),

    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<ChartData>,
    pub fetched_at: Option<DateTime<Local>>,

    /// `Some` while the ticker is being edited.
    pub input: Option<TickerInput>,

    /// Sequence number of the newest fetch issued.
    pub fetch_seq: u64,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            request: config.request.clone(),
            view: config.view,
            bar_source: config.bar_source,
            refresh_every: config.refresh,
            size: (0, 0),
            loading: false,
            error: None,
            data: None,
            fetched_at: None,
            input: None,
            fetch_seq: 0,
            should_quit: false,
        }
    }

    /// Marks a new fetch as in flight and returns it. Results of earlier
    /// fetches are ignored from now on.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.fetch_seq += 1;
        self.loading = true;
        self.error = None;
        FetchRequest {
            seq: self.fetch_seq,
            params: self.request.clone(),
            source: self.bar_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_upper_cases_and_validates() {
        let mut input = TickerInput::new("");
        for ch in "brk-b".chars() {
            input.push(ch);
        }
        assert_eq!(input.value, "BRK-B");

        input.push('/');
        assert_eq!(input.value, "BRK-B");
        assert_eq!(input.error.as_deref(), Some("invalid char: '/'"));

        input.pop();
        assert_eq!(input.value, "BRK-");
        assert!(input.error.is_none());
    }

    #[test]
    fn input_is_length_limited() {
        let mut input = TickerInput::new(&"A".repeat(MAX_SYMBOL_LEN));
        input.push('B');
        assert_eq!(input.value.len(), MAX_SYMBOL_LEN);
        assert!(input.error.is_some());
    }

    #[test]
    fn begin_fetch_bumps_sequence_and_clears_error() {
        let mut state = AppState::new(&AppConfig::default());
        state.error = Some("old".into());

        let first = state.begin_fetch();
        let second = state.begin_fetch();
        assert_eq!((first.seq, second.seq), (1, 2));
        assert!(state.loading);
        assert!(state.error.is_none());
        assert_eq!(second.params.symbol, "AAPL");
    }
}
