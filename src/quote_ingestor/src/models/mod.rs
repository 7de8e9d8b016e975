pub mod bar_series;
pub mod range;
pub mod request_params;
pub mod timeframe;
