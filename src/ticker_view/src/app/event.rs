use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::KeyEvent;

use crate::app::fetch::{ChartData, FetchRequest};

/// Result of a finished fetch, tagged with the request's sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub seq: u64,
    pub fetched_at: DateTime<Local>,
    pub result: Result<ChartData, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Fetched(FetchOutcome),
    /// Auto-refresh timer scheduled after fetch `seq` completed.
    RefreshTick { seq: u64 },
}

/// Work the terminal loop performs after a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Fetch(FetchRequest),
    /// Send `RefreshTick { seq }` after `after`.
    ScheduleRefresh { seq: u64, after: Duration },
}
