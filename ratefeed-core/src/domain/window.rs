//! TimeWindow — the shared history range requested for every currency.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Days per "year" when sizing the window. Leap days are ignored.
pub const DAYS_PER_YEAR: i64 = 365;

/// Inclusive `[start, end]` range, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window of `years` ending now. `None` if the start is not representable.
    pub fn last_years(years: u32) -> Option<Self> {
        Self::ending_at(Utc::now(), years)
    }

    /// Window of `years` ending at `end`. `None` if the start is not representable.
    pub fn ending_at(end: DateTime<Utc>, years: u32) -> Option<Self> {
        let span = TimeDelta::try_days(DAYS_PER_YEAR * i64::from(years))?;
        let start = end.checked_sub_signed(span)?;
        Some(Self { start, end })
    }

    pub fn start_epoch(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_epoch(&self) -> i64 {
        self.end.timestamp()
    }
}
