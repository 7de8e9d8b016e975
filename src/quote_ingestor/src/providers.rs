//! Provider abstraction for price data sources.
//!
//! This module defines the [`DataProvider`] trait, the interface the viewer
//! uses to fetch a chart for one symbol regardless of vendor. Each concrete
//! provider (currently only [`yahoo_rest`]) handles its own API shape and
//! validates the request against what that vendor accepts.
//!
//! The trait is async and object safe, so callers can hold an
//! `Arc<dyn DataProvider>` and swap in a fake in tests.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use quote_ingestor::models::{
//!     bar_series::{BarSeries, CloseSeries},
//!     request_params::ChartRequestParams,
//! };
//! use quote_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl DataProvider for EmptyProvider {
//!     async fn fetch_closes(
//!         &self,
//!         params: &ChartRequestParams,
//!     ) -> Result<CloseSeries, ProviderError> {
//!         Ok(CloseSeries { symbol: params.symbol.clone(), interval: params.interval, samples: vec![] })
//!     }
//!
//!     async fn fetch_bars(&self, params: &ChartRequestParams) -> Result<BarSeries, ProviderError> {
//!         Ok(BarSeries { symbol: params.symbol.clone(), interval: params.interval, bars: vec![] })
//!     }
//! }
//! ```

pub mod yahoo_rest;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{
    bar_series::{BarSeries, CloseSeries},
    request_params::ChartRequestParams,
};

/// Fetches chart data for one symbol from a price data vendor.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Close-only samples, already cleaned of missing observations.
    ///
    /// An empty or single-sample series is not an error; callers decide
    /// whether there is enough to plot.
    async fn fetch_closes(&self, params: &ChartRequestParams) -> Result<CloseSeries, ProviderError>;

    /// Native OHLC bars, with malformed entries discarded.
    async fn fetch_bars(&self, params: &ChartRequestParams) -> Result<BarSeries, ProviderError>;
}

/// Errors that can occur while constructing a provider.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The configured endpoint is not a usable base URL.
    #[snafu(display("Invalid base URL {url:?}: {reason}"))]
    InvalidBaseUrl {
        url: String,
        reason: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The vendor answered with an error payload or status.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// The response body could not be decoded.
    #[snafu(display("Failed to decode response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The vendor returned no chart for the symbol.
    #[snafu(display("no data for {symbol}"))]
    NoData { symbol: String, backtrace: Backtrace },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}

impl From<ProviderInitError> for ProviderError {
    fn from(source: ProviderInitError) -> Self {
        ProviderError::Init { source }
    }
}
