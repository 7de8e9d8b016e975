//! Core charting primitives for the ticker viewer.
//!
//! - [`models`]: price [`Sample`](models::sample::Sample)s and OHLC [`Bar`](models::bar::Bar)s.
//! - [`synth`]: builds bars from a close-only series and drops unusable samples.
//! - [`raster`]: maps bars (or a plain series) onto a fixed-size character canvas.
//!
//! Everything in this crate is synchronous and free of I/O; every render call
//! builds its own canvas.

#![deny(missing_docs)]

pub mod errors;
pub mod models;
pub mod raster;
pub mod synth;

pub use errors::RenderError;
pub use models::{
    bar::{Bar, Direction},
    sample::Sample,
};
pub use raster::{
    PlotSize,
    candles::{rasterize_candles, render_candles, render_candles_with},
    canvas::{Canvas, Cell},
    line::{rasterize_line, render_line, render_line_with},
    palette::Palette,
};
pub use synth::{clean_samples, synthesize, synthesize_samples};
