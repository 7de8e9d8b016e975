use std::time::Instant;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, Url};
use shared_utils::env::get_env_var_opt;
use snafu::ResultExt;
use tracing::{debug, info};

use crate::{
    models::{
        bar_series::{BarSeries, CloseSeries},
        request_params::ChartRequestParams,
    },
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, InvalidBaseUrlSnafu, ProviderError,
        ProviderInitError, ReqwestSnafu, ValidationSnafu,
        yahoo_rest::{
            params::{construct_params, validate_request},
            response::{YahooChartResponse, YahooChartResult},
        },
    },
};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
/// Overrides [`DEFAULT_BASE_URL`], e.g. to point at a local fixture server.
pub const BASE_URL_ENV: &str = "TICKER_FORGE_YAHOO_URL";
const USER_AGENT: &str = "Mozilla/5.0 (TickerForge)";
const ERROR_BODY_PREVIEW: usize = 200;

pub struct YahooProvider {
    client: Client,
    base_url: Url,
    limiter: DefaultDirectRateLimiter,
}

impl YahooProvider {
    /// Creates a provider against [`DEFAULT_BASE_URL`], or the URL in the
    /// `TICKER_FORGE_YAHOO_URL` environment variable when set.
    pub fn new() -> Result<Self, ProviderInitError> {
        let base_url = get_env_var_opt(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&base_url)
    }

    /// Creates a provider against an explicit endpoint.
    pub fn with_base_url(base_url: &str) -> Result<Self, ProviderInitError> {
        // join() replaces the last path segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| {
            InvalidBaseUrlSnafu {
                url: base_url,
                reason: e.to_string(),
            }
            .build()
        })?;
        if base_url.cannot_be_a_base() {
            return InvalidBaseUrlSnafu {
                url: base_url.as_str(),
                reason: "URL cannot be used as a base",
            }
            .fail();
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url,
            limiter: RateLimiter::direct(Quota::per_second(nonzero!(2u32))),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn chart_url(&self, symbol: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(&format!("v8/finance/chart/{symbol}"))
            .map_err(|e| {
                ValidationSnafu {
                    message: format!("cannot build chart URL for {symbol}: {e}"),
                }
                .build()
            })
    }

    async fn fetch_chart(&self, params: &ChartRequestParams) -> Result<YahooChartResult, ProviderError> {
        validate_request(params)?;
        let url = self.chart_url(&params.symbol)?;

        self.limiter.until_ready().await;
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .query(&construct_params(params))
            .send()
            .await
            .context(ReqwestSnafu)?;
        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;
        debug!(
            symbol = %params.symbol,
            %status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chart response received"
        );

        // error payloads arrive with 4xx statuses, so decode before checking the status
        match serde_json::from_str::<YahooChartResponse>(&body) {
            Ok(chart) => chart.into_result(&params.symbol),
            Err(_) if !status.is_success() => ApiSnafu {
                message: format!("HTTP {status}: {}", preview(&body)),
            }
            .fail(),
            Err(e) => Err(e).context(DecodeSnafu),
        }
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_PREVIEW) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_closes(&self, params: &ChartRequestParams) -> Result<CloseSeries, ProviderError> {
        let result = self.fetch_chart(params).await?;
        let samples = result.close_samples();
        info!(symbol = %params.symbol, range = %params.range, interval = %params.interval, samples = samples.len(), "fetched closes");

        Ok(CloseSeries {
            symbol: params.symbol.clone(),
            interval: params.interval,
            samples,
        })
    }

    async fn fetch_bars(&self, params: &ChartRequestParams) -> Result<BarSeries, ProviderError> {
        let result = self.fetch_chart(params).await?;
        let bars = result.bars();
        info!(symbol = %params.symbol, range = %params.range, interval = %params.interval, bars = bars.len(), "fetched bars");

        Ok(BarSeries {
            symbol: params.symbol.clone(),
            interval: params.interval,
            bars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let provider = YahooProvider::with_base_url("http://127.0.0.1:9/proxy").unwrap();
        assert_eq!(
            provider.chart_url("AAPL").unwrap().as_str(),
            "http://127.0.0.1:9/proxy/v8/finance/chart/AAPL"
        );
    }

    #[test]
    fn default_url_builds_chart_path() {
        let provider = YahooProvider::with_base_url(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            provider.chart_url("MSFT").unwrap().as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/MSFT"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            YahooProvider::with_base_url("not a url"),
            Err(ProviderInitError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            YahooProvider::with_base_url("mailto:someone@example.com"),
            Err(ProviderInitError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), ERROR_BODY_PREVIEW);
        assert_eq!(preview("short"), "short");
    }
}
