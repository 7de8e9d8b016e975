//! Price-to-row scaling shared by both render modes.

use crate::models::bar::Bar;

/// Linear map from a price range onto canvas rows, highest price on row 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    lo: f64,
    hi: f64,
    rows: usize,
}

impl PriceScale {
    /// Scale over `[lo, hi]` for `rows` rows.
    ///
    /// A flat range is widened upwards so every price lands on the bottom row.
    /// The step grows with the magnitude of `lo` so it stays representable.
    pub fn new(lo: f64, hi: f64, rows: usize) -> Self {
        let hi = if hi == lo {
            lo + (lo.abs() * f64::EPSILON * 4.0).max(1.0)
        } else {
            hi
        };
        Self { lo, hi, rows }
    }

    /// Scale spanning the lowest low to the highest high of `bars`.
    pub fn from_bars(bars: &[Bar], rows: usize) -> Self {
        let lo = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let hi = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        Self::new(lo, hi, rows)
    }

    /// Scale spanning the min and max of `values`.
    pub fn from_values(values: &[f64], rows: usize) -> Self {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::new(lo, hi, rows)
    }

    /// Row for `price`: `round((rows - 1) * (1 - (price - lo) / (hi - lo)))`,
    /// clamped to the canvas.
    pub fn row_of(&self, price: f64) -> usize {
        let last = self.rows.saturating_sub(1) as f64;
        let span = self.hi - self.lo;
        let frac = if span > 0.0 { (price - self.lo) / span } else { 0.0 };
        (last * (1.0 - frac)).round().clamp(0.0, last) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_map_to_first_and_last_row() {
        let scale = PriceScale::new(8.0, 12.0, 5);
        assert_eq!(scale.row_of(12.0), 0);
        assert_eq!(scale.row_of(8.0), 4);
        assert_eq!(scale.row_of(11.0), 1);
        assert_eq!(scale.row_of(9.0), 3);
    }

    #[test]
    fn out_of_range_prices_are_clamped() {
        let scale = PriceScale::new(8.0, 12.0, 5);
        assert_eq!(scale.row_of(100.0), 0);
        assert_eq!(scale.row_of(-3.0), 4);
    }

    #[test]
    fn flat_range_is_widened() {
        let scale = PriceScale::new(5.0, 5.0, 10);
        assert_eq!(scale.row_of(5.0), 9);
        assert_eq!(scale.row_of(6.0), 0);
    }

    #[test]
    fn huge_flat_range_stays_on_bottom_row() {
        for price in [1e17, -1e17, 9.007_199_254_740_992e15, f64::MAX / 8.0] {
            let scale = PriceScale::new(price, price, 10);
            assert_eq!(scale.row_of(price), 9, "flat series at {price}");
        }
    }

    #[test]
    fn bars_use_low_and_high() {
        let bars = [Bar::new(10.0, 12.0, 9.0, 11.0), Bar::new(11.0, 11.0, 8.0, 9.0)];
        let scale = PriceScale::from_bars(&bars, 5);
        assert_eq!(scale, PriceScale::new(8.0, 12.0, 5));
        assert_eq!((scale.row_of(12.0), scale.row_of(8.0)), (0, 4));
    }
}
