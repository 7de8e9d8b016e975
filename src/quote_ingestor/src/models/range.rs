//! Lookback window of a chart request.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart range {0:?} (expected one of 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, ytd, max)")]
pub struct ParseRangeError(pub String);

/// How far back a chart reaches, counted from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartRange {
    #[default]
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    YearToDate,
    Max,
}

impl ChartRange {
    pub const ALL: [ChartRange; 10] = [
        ChartRange::OneDay,
        ChartRange::FiveDays,
        ChartRange::OneMonth,
        ChartRange::ThreeMonths,
        ChartRange::SixMonths,
        ChartRange::OneYear,
        ChartRange::TwoYears,
        ChartRange::FiveYears,
        ChartRange::YearToDate,
        ChartRange::Max,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ChartRange::OneDay => "1d",
            ChartRange::FiveDays => "5d",
            ChartRange::OneMonth => "1mo",
            ChartRange::ThreeMonths => "3mo",
            ChartRange::SixMonths => "6mo",
            ChartRange::OneYear => "1y",
            ChartRange::TwoYears => "2y",
            ChartRange::FiveYears => "5y",
            ChartRange::YearToDate => "ytd",
            ChartRange::Max => "max",
        }
    }

    /// Approximate span in days; `ytd` counts as a full year and `max` as unbounded.
    pub const fn approx_days(self) -> u32 {
        match self {
            ChartRange::OneDay => 1,
            ChartRange::FiveDays => 5,
            ChartRange::OneMonth => 31,
            ChartRange::ThreeMonths => 92,
            ChartRange::SixMonths => 183,
            ChartRange::OneYear | ChartRange::YearToDate => 366,
            ChartRange::TwoYears => 731,
            ChartRange::FiveYears => 1827,
            ChartRange::Max => u32::MAX,
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseRangeError(s.to_string()))
    }
}

impl TryFrom<String> for ChartRange {
    type Error = ParseRangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChartRange> for String {
    fn from(value: ChartRange) -> Self {
        value.as_str().to_string()
    }
}
