//! Candlestick mode: one column per bar, wick under body.

use crate::errors::RenderError;
use crate::models::bar::Bar;
use crate::raster::{
    PlotSize,
    canvas::{Canvas, Cell},
    most_recent,
    palette::Palette,
    scale::PriceScale,
};

/// Renders `bars` into a `width` x `height` terminal area with ANSI colours.
///
/// See [`render_candles_with`].
pub fn render_candles(bars: &[Bar], width: usize, height: usize) -> Result<String, RenderError> {
    render_candles_with(bars, width, height, &Palette::ansi())
}

/// Renders `bars` into a `width` x `height` terminal area.
///
/// The plot is shrunk by the header/footer margin (see
/// [`PlotSize::effective`]) and only the most recent bars that fit are drawn.
///
/// Errors:
/// - [`RenderError::InvalidInput`] for an empty slice, a malformed bar or a
///   zero dimension.
pub fn render_candles_with(
    bars: &[Bar],
    width: usize,
    height: usize,
    palette: &Palette,
) -> Result<String, RenderError> {
    let plot = PlotSize::effective(width, height)?;
    Ok(rasterize_candles(bars, plot)?.render(palette))
}

/// Draws bars onto a canvas of exactly `plot.height` rows and
/// `min(bars.len(), plot.width)` columns.
///
/// For every kept bar the rows from `row(high)` to `row(low)` are marked as
/// wick, then the rows between `row(open)` and `row(close)` are marked as
/// body, replacing the wick there. The column is tagged up when
/// `close >= open`.
pub fn rasterize_candles(bars: &[Bar], plot: PlotSize) -> Result<Canvas, RenderError> {
    if bars.is_empty() {
        return Err(RenderError::InvalidInput("no bars to render".into()));
    }
    if let Some(idx) = bars.iter().position(|b| !b.is_well_formed()) {
        return Err(RenderError::InvalidInput(format!(
            "bar {idx} is malformed: {:?}",
            bars[idx]
        )));
    }

    let kept = most_recent(bars, plot.width);
    let scale = PriceScale::from_bars(kept, plot.height);
    let mut canvas = Canvas::new(kept.len(), plot.height);

    for (col, bar) in kept.iter().enumerate() {
        canvas.fill(col, scale.row_of(bar.high)..=scale.row_of(bar.low), Cell::Wick);

        let row_open = scale.row_of(bar.open);
        let row_close = scale.row_of(bar.close);
        canvas.fill(col, row_open.min(row_close)..=row_open.max(row_close), Cell::Body);

        canvas.tag(col, bar.direction());
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bar::Direction;

    fn two_bars() -> Vec<Bar> {
        vec![Bar::new(10.0, 12.0, 9.0, 11.0), Bar::new(11.0, 11.0, 8.0, 9.0)]
    }

    #[test]
    fn two_bar_grid_matches_hand_computed_rows() {
        let canvas = rasterize_candles(&two_bars(), PlotSize::new(2, 5).unwrap()).unwrap();

        // bar 1: high 0, close 1, open 2, low 3; bar 2: high/open 1, close 3, low 4
        assert_eq!(canvas.render(&Palette::plain()), "│ \n┃┃\n┃┃\n│┃\n │");
        assert_eq!(canvas.direction(0), Some(Direction::Up));
        assert_eq!(canvas.direction(1), Some(Direction::Down));
    }

    #[test]
    fn two_bar_grid_in_ansi() {
        let canvas = rasterize_candles(&two_bars(), PlotSize::new(2, 5).unwrap()).unwrap();
        let rows: Vec<String> = canvas.render(&Palette::ansi()).lines().map(String::from).collect();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "\x1b[32m│\x1b[0m ");
        assert_eq!(rows[3], "\x1b[32m│\x1b[0m\x1b[31m┃\x1b[0m");
        assert_eq!(rows[4], " \x1b[31m│\x1b[0m");
    }

    #[test]
    fn doji_is_tagged_up() {
        let bars = [Bar::new(10.0, 11.0, 9.0, 10.0)];
        let canvas = rasterize_candles(&bars, PlotSize::new(1, 5).unwrap()).unwrap();
        assert_eq!(canvas.direction(0), Some(Direction::Up));
    }

    #[test]
    fn flat_series_marks_single_row() {
        let bars = vec![Bar::new(5.0, 5.0, 5.0, 5.0); 3];
        let canvas = rasterize_candles(&bars, PlotSize::new(40, 10).unwrap()).unwrap();

        let marked: Vec<usize> = (0..canvas.height())
            .filter(|&r| canvas.row(r).iter().any(|c| *c != Cell::Blank))
            .collect();
        assert_eq!(marked, vec![9]);
        assert!(canvas.row(9).iter().all(|c| *c == Cell::Body));
    }

    #[test]
    fn keeps_most_recent_bars() {
        let bars: Vec<Bar> = (0..50)
            .map(|i| {
                let p = 100.0 + i as f64;
                Bar::new(p, p + 1.0, p - 1.0, p + 0.5)
            })
            .collect();
        let canvas = rasterize_candles(&bars, PlotSize::new(40, 10).unwrap()).unwrap();

        assert_eq!(canvas.width(), 40);
        // the newest bar holds the global high and reaches row 0
        assert_ne!(canvas.cell(0, 39), Cell::Blank);
        // bar 10 is the oldest kept and holds the global low
        assert_ne!(canvas.cell(9, 0), Cell::Blank);
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(matches!(render_candles(&[], 80, 30), Err(RenderError::InvalidInput(_))));
    }

    #[test]
    fn zero_dimension_is_invalid() {
        assert!(matches!(render_candles(&two_bars(), 0, 30), Err(RenderError::InvalidInput(_))));
    }

    #[test]
    fn malformed_bar_is_invalid() {
        let bars = [Bar::new(10.0, 9.0, 8.0, 11.0)];
        let err = render_candles(&bars, 80, 30).unwrap_err();
        assert!(err.to_string().contains("bar 0 is malformed"));
    }

    #[test]
    fn render_uses_effective_height() {
        let out = render_candles_with(&two_bars(), 80, 30, &Palette::plain()).unwrap();
        assert_eq!(out.lines().count(), 22);
        assert!(out.lines().all(|l| l.chars().count() == 2));
    }
}
