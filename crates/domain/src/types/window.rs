//! Concrete UTC time windows resolved from free text.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::BUSY_PROBE_WINDOW_SECONDS;
use crate::errors::{AwayDeskError, Result};

/// UTC window implied by a natural-language time expression.
///
/// Invariant: `start <= end`. Built once per inbound message and never
/// mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    is_relative_now: bool,
    date: NaiveDate,
}

impl ResolvedWindow {
    /// Build a window, rejecting inverted bounds.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, is_relative_now: bool) -> Result<Self> {
        if start > end {
            return Err(AwayDeskError::InvalidInput(format!(
                "window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end, is_relative_now, date: start.date_naive() })
    }

    /// `[now, now + minutes)`, flagged relative to now.
    ///
    /// An end past the representable range is clamped to the latest instant.
    pub fn relative_now(now: DateTime<Utc>, minutes: i64) -> Self {
        let end = Duration::try_minutes(minutes.max(0))
            .and_then(|span| now.checked_add_signed(span))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start: now, end, is_relative_now: true, date: now.date_naive() }
    }

    /// `[date 00:00:00Z, date 23:59:59Z]`.
    pub fn whole_day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::seconds(86_399);
        Self { start, end, is_relative_now: false, date }
    }

    /// Narrow `[now, now + 1min)` window used to check whether the owner is
    /// in an event right now.
    pub fn busy_probe(now: DateTime<Utc>) -> Self {
        Self {
            start: now,
            end: now + Duration::seconds(BUSY_PROBE_WINDOW_SECONDS),
            is_relative_now: true,
            date: now.date_naive(),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_relative_now(&self) -> bool {
        self.is_relative_now
    }

    /// Calendar date the window was resolved for (UTC).
    pub fn resolved_date(&self) -> NaiveDate {
        self.date
    }
}
