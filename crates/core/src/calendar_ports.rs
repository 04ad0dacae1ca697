//! Calendar query port interface
//!
//! Implemented by infrastructure adapters over an already-authorized calendar
//! backend. The aggregator treats any error or timeout from an implementation
//! as that source contributing no events.

use async_trait::async_trait;
use awaydesk_domain::{Event, Result};
use chrono::{DateTime, Utc};

/// Trait for read-only calendar queries
#[async_trait]
pub trait CalendarQueryService: Send + Sync {
    /// List single-occurrence events of `source_id` overlapping
    /// `[time_min, time_max)`, ordered by start.
    ///
    /// Implementations validate the backend payload and return only
    /// well-formed events, tagged with `source_id`.
    async fn list_events(
        &self,
        source_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<Event>>;
}
