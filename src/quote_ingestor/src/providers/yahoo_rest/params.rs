use crate::{
    models::{
        range::ChartRange,
        request_params::ChartRequestParams,
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Interval tokens the chart endpoint understands.
pub const SUPPORTED_INTERVALS: [&str; 13] = [
    "1m", "2m", "5m", "15m", "30m", "60m", "90m", "1h", "1d", "5d", "1wk", "1mo", "3mo",
];

/// Query string for a chart request.
pub fn construct_params(params: &ChartRequestParams) -> Vec<(String, String)> {
    vec![
        ("range".to_string(), params.range.to_string()),
        ("interval".to_string(), params.interval.to_string()),
    ]
}

/// Checks the interval is one of [`SUPPORTED_INTERVALS`].
pub fn validate_timeframe(timeframe: &TimeFrame) -> Result<(), ProviderError> {
    let token = timeframe.to_string();
    if SUPPORTED_INTERVALS.contains(&token.as_str()) {
        Ok(())
    } else {
        ValidationSnafu {
            message: format!(
                "interval {token} is not supported (expected one of {})",
                SUPPORTED_INTERVALS.join(", ")
            ),
        }
        .fail()
    }
}

/// Rejects range/interval pairs the endpoint answers with an error.
///
/// One-minute bars only reach back about a week, other minute intervals
/// about 60 days and whole-hour bars (`60m` as well as `1h`) about two years.
pub fn validate_range(range: ChartRange, interval: &TimeFrame) -> Result<(), ProviderError> {
    if !interval.is_intraday() {
        return Ok(());
    }
    let minutes = match interval.unit {
        TimeFrameUnit::Hour => interval.amount.saturating_mul(60),
        _ => interval.amount,
    };
    let max_days = match minutes {
        1 => ChartRange::FiveDays,
        m if m % 60 == 0 => ChartRange::TwoYears,
        _ => ChartRange::OneMonth,
    }
    .approx_days();
    if range.approx_days() > max_days {
        return ValidationSnafu {
            message: format!("range {range} is too long for {interval} bars"),
        }
        .fail();
    }
    Ok(())
}

/// Runs every request check the provider applies before going to the network.
pub fn validate_request(params: &ChartRequestParams) -> Result<(), ProviderError> {
    validate_timeframe(&params.interval)?;
    validate_range(params.range, &params.interval)
}
