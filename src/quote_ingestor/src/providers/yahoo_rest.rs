//! Yahoo Finance chart endpoint (`/v8/finance/chart/{symbol}`).
//!
//! Unofficial and keyless: requests only need a browser-like `User-Agent`.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::YahooProvider;
