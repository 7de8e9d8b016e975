//! Vendor-agnostic price data types.

pub mod bar;
pub mod sample;
