//! Terminal rasterizer.
//!
//! A render call turns an ordered series into a [`Canvas`](canvas::Canvas)
//! of `height` rows by one column per plotted item, then serializes it with a
//! [`Palette`](palette::Palette). Two modes share the same scaling:
//!
//! - [`candles`]: OHLC bars drawn as a wick with a body on top of it.
//! - [`line`]: a single connected polyline over a value series.
//!
//! Requested sizes are the whole area available to the caller; a fixed margin
//! is reserved for header, caption and footer text, see [`PlotSize::effective`].

pub mod candles;
pub mod canvas;
pub mod line;
pub mod palette;
pub mod scale;

use crate::errors::RenderError;

/// Columns reserved around the plot for axis/caption text.
pub const WIDTH_MARGIN: usize = 4;
/// Rows reserved for header, caption and footer text.
pub const HEIGHT_MARGIN: usize = 8;
/// Smallest plot width ever produced from a request.
pub const MIN_PLOT_WIDTH: usize = 40;
/// Smallest plot height ever produced from a request.
pub const MIN_PLOT_HEIGHT: usize = 10;

/// Dimensions of the plotting area in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSize {
    /// Maximum number of columns (one per bar or value).
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl PlotSize {
    /// Exact plotting dimensions, no margin applied.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        ensure_dimensions(width, height)?;
        Ok(Self { width, height })
    }

    /// Derives the plotting area from a requested terminal area.
    ///
    /// The margin is subtracted first, then the result is raised to the
    /// [`MIN_PLOT_WIDTH`] x [`MIN_PLOT_HEIGHT`] floor. Zero dimensions are
    /// rejected.
    pub fn effective(width: usize, height: usize) -> Result<Self, RenderError> {
        ensure_dimensions(width, height)?;
        Ok(Self {
            width: width.saturating_sub(WIDTH_MARGIN).max(MIN_PLOT_WIDTH),
            height: height.saturating_sub(HEIGHT_MARGIN).max(MIN_PLOT_HEIGHT),
        })
    }
}

fn ensure_dimensions(width: usize, height: usize) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidInput(format!(
            "plot dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

/// The most recent `budget` items, in original order.
fn most_recent<T>(items: &[T], budget: usize) -> &[T] {
    &items[items.len().saturating_sub(budget)..]
}
