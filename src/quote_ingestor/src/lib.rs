//! Price data acquisition for the ticker viewer.
//!
//! [`models`] holds the vendor-agnostic request/response types and
//! [`providers`] the [`DataProvider`](providers::DataProvider) trait with its
//! Yahoo Finance implementation.

pub mod models;
pub mod providers;

pub use models::{
    bar_series::{BarSeries, CloseSeries},
    range::ChartRange,
    request_params::ChartRequestParams,
    timeframe::{TimeFrame, TimeFrameUnit},
};
pub use providers::{DataProvider, ProviderError, ProviderInitError, yahoo_rest::YahooProvider};
