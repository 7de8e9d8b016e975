//! Terminal front end for the ticker viewer.
//!
//! The binary wires these pieces together: [`cli`] and [`config`] resolve
//! what to show, [`logging`] routes `tracing` output away from the terminal
//! in TUI mode, [`tui`] runs the interactive loop around the pure
//! [`app::reducer`], and [`print`] renders a single chart to stdout.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod print;
pub mod tui;
