//! Line mode: a single connected polyline over a value series.

use crate::errors::RenderError;
use crate::raster::{
    PlotSize,
    canvas::{Canvas, Cell},
    most_recent,
    palette::Palette,
    scale::PriceScale,
};

const SYMBOL_FLAT: char = '─';
const SYMBOL_VERTICAL: char = '│';
const SYMBOL_RISE_FROM: char = '╯';
const SYMBOL_RISE_TO: char = '╭';
const SYMBOL_FALL_FROM: char = '╮';
const SYMBOL_FALL_TO: char = '╰';

/// Renders `values` as a polyline into a `width` x `height` terminal area.
///
/// Line mode carries no direction, so the output is the same for every
/// palette; the palette variant exists to mirror the candle API.
pub fn render_line(values: &[f64], width: usize, height: usize) -> Result<String, RenderError> {
    render_line_with(values, width, height, &Palette::ansi())
}

/// Same as [`render_line`] with an explicit palette.
pub fn render_line_with(
    values: &[f64],
    width: usize,
    height: usize,
    palette: &Palette,
) -> Result<String, RenderError> {
    let plot = PlotSize::effective(width, height)?;
    Ok(rasterize_line(values, plot)?.render(palette))
}

/// Draws the most recent `plot.width` values onto a canvas of exactly
/// `plot.height` rows.
///
/// Column 0 is a flat stroke at the first value's row. Every later column
/// joins the previous row to its own row with box-drawing corners and a
/// vertical run between them.
pub fn rasterize_line(values: &[f64], plot: PlotSize) -> Result<Canvas, RenderError> {
    if values.is_empty() {
        return Err(RenderError::InvalidInput("no values to render".into()));
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        return Err(RenderError::InvalidInput(format!(
            "value {idx} is not finite: {}",
            values[idx]
        )));
    }

    let kept = most_recent(values, plot.width);
    let scale = PriceScale::from_values(kept, plot.height);
    let mut canvas = Canvas::new(kept.len(), plot.height);

    let mut prev = scale.row_of(kept[0]);
    canvas.set(prev, 0, Cell::Trace(SYMBOL_FLAT));

    for (col, &value) in kept.iter().enumerate().skip(1) {
        let row = scale.row_of(value);
        if row == prev {
            canvas.set(row, col, Cell::Trace(SYMBOL_FLAT));
        } else if row < prev {
            canvas.set(prev, col, Cell::Trace(SYMBOL_RISE_FROM));
            canvas.set(row, col, Cell::Trace(SYMBOL_RISE_TO));
            for between in row + 1..prev {
                canvas.set(between, col, Cell::Trace(SYMBOL_VERTICAL));
            }
        } else {
            canvas.set(prev, col, Cell::Trace(SYMBOL_FALL_FROM));
            canvas.set(row, col, Cell::Trace(SYMBOL_FALL_TO));
            for between in prev + 1..row {
                canvas.set(between, col, Cell::Trace(SYMBOL_VERTICAL));
            }
        }
        prev = row;
    }

    Ok(canvas)
}
