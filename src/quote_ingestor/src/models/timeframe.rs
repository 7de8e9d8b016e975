//! Bar interval as an amount of a calendar unit.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFrameError {
    #[error("Invalid amount for {unit:?}: {message}")]
    InvalidAmount { unit: TimeFrameUnit, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeFrameUnit {
    /// Suffix used in interval tokens (`5m`, `1h`, `1wk`, ...).
    pub const fn suffix(self) -> &'static str {
        match self {
            TimeFrameUnit::Minute => "m",
            TimeFrameUnit::Hour => "h",
            TimeFrameUnit::Day => "d",
            TimeFrameUnit::Week => "wk",
            TimeFrameUnit::Month => "mo",
        }
    }
}

/// The interval covered by one bar, e.g. 5 minutes or 1 week.
///
/// Any positive amount is representable; which combinations a vendor
/// accepts is checked by each provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        if amount == 0 {
            return Err(TimeFrameError::InvalidAmount {
                unit,
                message: "amount must be at least 1".into(),
            });
        }
        Ok(Self { amount, unit })
    }

    pub const fn minutes(amount: u32) -> Self {
        Self {
            amount,
            unit: TimeFrameUnit::Minute,
        }
    }

    pub const fn days(amount: u32) -> Self {
        Self {
            amount,
            unit: TimeFrameUnit::Day,
        }
    }

    /// True for sub-daily intervals.
    pub fn is_intraday(&self) -> bool {
        matches!(self.unit, TimeFrameUnit::Minute | TimeFrameUnit::Hour)
    }
}

impl Default for TimeFrame {
    fn default() -> Self {
        Self::minutes(1)
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        // longer suffixes first so "1mo" is not read as minutes
        let units = [
            TimeFrameUnit::Week,
            TimeFrameUnit::Month,
            TimeFrameUnit::Minute,
            TimeFrameUnit::Hour,
            TimeFrameUnit::Day,
        ];
        let (digits, unit) = units
            .iter()
            .find_map(|u| token.strip_suffix(u.suffix()).map(|rest| (rest, *u)))
            .ok_or_else(|| TimeFrameError::InvalidInput {
                message: format!("unrecognised interval {s:?}"),
            })?;

        let amount = digits.parse::<u32>().map_err(|_| TimeFrameError::InvalidInput {
            message: format!("interval {s:?} must start with a positive integer"),
        })?;
        Self::new(amount, unit)
    }
}

impl TryFrom<String> for TimeFrame {
    type Error = TimeFrameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeFrame> for String {
    fn from(value: TimeFrame) -> Self {
        value.to_string()
    }
}
