//! Calendar events as seen by the aggregator.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// When an event starts or ends: a precise instant, or a whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EventTime {
    Instant(DateTime<Utc>),
    AllDay(NaiveDate),
}

impl EventTime {
    /// Comparable instant; all-day entries map to midnight UTC of their date.
    pub fn effective_start(&self) -> DateTime<Utc> {
        match self {
            Self::Instant(instant) => *instant,
            Self::AllDay(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// UTC calendar date of the effective start.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Instant(instant) => instant.date_naive(),
            Self::AllDay(date) => *date,
        }
    }

    /// ISO-like rendering in the given zone: RFC 3339 for instants, `YYYY-MM-DD`
    /// for all-day entries.
    pub fn to_display_string(&self, tz: Tz) -> String {
        match self {
            Self::Instant(instant) => {
                instant.with_timezone(&tz).to_rfc3339_opts(SecondsFormat::Secs, false)
            }
            Self::AllDay(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// A single calendar entry copied out of the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub source_id: String,
    pub start: EventTime,
    pub end: EventTime,
    pub summary: String,
}

impl Event {
    pub fn effective_start(&self) -> DateTime<Utc> {
        self.start.effective_start()
    }

    /// End as a comparable instant (midnight UTC for all-day ends).
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.end.effective_start()
    }
}

/// Merged events from every source, ordered by effective start.
///
/// Invariant: never longer than the `max_results` it was built with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResult {
    events: Vec<Event>,
}

impl AggregatedResult {
    /// Stable-sort by effective start and keep the first `max_results`.
    ///
    /// Entries with the same start keep the order they arrived in.
    pub fn from_events(mut events: Vec<Event>, max_results: usize) -> Self {
        events.sort_by_key(Event::effective_start);
        events.truncate(max_results);
        Self { events }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Earliest entry by effective start.
    pub fn first(&self) -> Option<&Event> {
        self.events.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a AggregatedResult {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
