//! Bar synthesis from close-only series.
//!
//! When a source only reports closing prices, each bar is built from two
//! consecutive closes: the previous close becomes the open and the high/low
//! simply bound the pair. True intrabar excursions cannot be recovered from
//! such data, so a synthesized bar's range is always `[min(o, c), max(o, c)]`.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{bar::Bar, sample::Sample};

/// Builds `prices.len() - 1` bars from consecutive prices.
///
/// Bar `i` (counted from the second price) has `open = prices[i - 1]`,
/// `close = prices[i]` and takes `timestamps[i]` when present. Fewer than two
/// prices yield an empty vector.
pub fn synthesize(timestamps: &[DateTime<Utc>], prices: &[f64]) -> Vec<Bar> {
    prices
        .windows(2)
        .enumerate()
        .map(|(k, pair)| {
            let mut bar = bounded_bar(pair[0], pair[1]);
            bar.timestamp = timestamps.get(k + 1).copied();
            bar
        })
        .collect()
}

/// Same as [`synthesize`] over a slice of samples.
pub fn synthesize_samples(samples: &[Sample]) -> Vec<Bar> {
    samples
        .windows(2)
        .map(|pair| bounded_bar(pair[0].price, pair[1].price).with_timestamp(pair[1].timestamp))
        .collect()
}

/// Drops samples with a zero, NaN or infinite price.
///
/// Missing observations are removed rather than zero-filled, so gaps never
/// drag the price scale down to zero.
pub fn clean_samples(samples: impl IntoIterator<Item = Sample>) -> Vec<Sample> {
    let mut dropped = 0usize;
    let kept: Vec<Sample> = samples
        .into_iter()
        .filter(|s| {
            let usable = s.is_usable();
            if !usable {
                dropped += 1;
            }
            usable
        })
        .collect();
    if dropped > 0 {
        debug!(dropped, kept = kept.len(), "dropped unusable price samples");
    }
    kept
}

fn bounded_bar(open: f64, close: f64) -> Bar {
    Bar::new(open, open.max(close), open.min(close), close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn previous_close_becomes_open() {
        let times = [ts(0), ts(60), ts(120)];
        let bars = synthesize(&times, &[10.0, 12.0, 11.0]);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0], Bar::new(10.0, 12.0, 10.0, 12.0).with_timestamp(ts(60)));
        assert_eq!(bars[1], Bar::new(12.0, 12.0, 11.0, 11.0).with_timestamp(ts(120)));
    }

    #[test]
    fn fewer_than_two_prices_is_empty() {
        assert!(synthesize(&[], &[]).is_empty());
        assert!(synthesize(&[ts(0)], &[10.0]).is_empty());
        assert!(synthesize_samples(&[Sample::new(ts(0), 1.0)]).is_empty());
    }

    #[test]
    fn missing_timestamps_stay_unset() {
        let bars = synthesize(&[ts(0)], &[1.0, 2.0, 3.0]);
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| b.timestamp.is_none()));
    }

    #[test]
    fn sample_form_matches_slice_form() {
        let samples: Vec<Sample> = [5.0, 4.0, 4.0, 6.5]
            .iter()
            .enumerate()
            .map(|(i, p)| Sample::new(ts(i as i64 * 60), *p))
            .collect();
        let times: Vec<_> = samples.iter().map(|s| s.timestamp).collect();
        let prices: Vec<_> = samples.iter().map(|s| s.price).collect();

        assert_eq!(synthesize_samples(&samples), synthesize(&times, &prices));
    }

    #[test]
    fn clean_drops_zero_and_nan() {
        let raw = vec![
            Sample::new(ts(0), 10.0),
            Sample::new(ts(1), 0.0),
            Sample::new(ts(2), f64::NAN),
            Sample::new(ts(3), f64::INFINITY),
            Sample::new(ts(4), 11.0),
        ];
        let kept = clean_samples(raw);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].price, 10.0);
        assert_eq!(kept[1].timestamp, ts(4));
    }

    proptest! {
        #[test]
        fn synthesized_bars_bound_open_and_close(
            prices in proptest::collection::vec(0.01f64..10_000.0, 0..64),
        ) {
            let bars = synthesize(&[], &prices);
            prop_assert_eq!(bars.len(), prices.len().saturating_sub(1));
            for bar in &bars {
                prop_assert!(bar.low <= bar.open.min(bar.close));
                prop_assert!(bar.high >= bar.open.max(bar.close));
                prop_assert!(bar.is_well_formed());
            }
        }
    }
}
