//! Multi-calendar event aggregation
//!
//! Fans a window out to every configured calendar source with bounded
//! concurrency, each query under its own timeout, and merges whatever comes
//! back. A failing or stuck source contributes nothing; it never fails the
//! aggregation.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use awaydesk_domain::constants::{DEFAULT_MAX_CONCURRENT_SOURCES, DEFAULT_SOURCE_TIMEOUT_SECONDS};
use awaydesk_domain::{AggregatedResult, Event, ResolvedWindow};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::ports::CalendarQueryService;

/// Merges events from several calendar sources into one capped list.
pub struct EventAggregator {
    calendar: Arc<dyn CalendarQueryService>,
    max_results: usize,
    source_timeout: Duration,
    max_concurrency: usize,
}

impl EventAggregator {
    pub fn new(calendar: Arc<dyn CalendarQueryService>, max_results: usize) -> Self {
        Self {
            calendar,
            max_results,
            source_timeout: Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECONDS),
            max_concurrency: DEFAULT_MAX_CONCURRENT_SOURCES,
        }
    }

    /// Bound each per-source query.
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    /// Bound how many sources are queried at once.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit.max(1);
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Aggregate events overlapping `window` across `sources`.
    ///
    /// Unless the window is relative to now, events whose start date differs
    /// from the window's date are dropped. Output is stable-sorted by
    /// effective start (source order breaks ties) and capped at
    /// `max_results`.
    pub async fn aggregate(&self, sources: &[String], window: &ResolvedWindow) -> AggregatedResult {
        // `buffered` yields in input order, so results stay in source order.
        let per_source: Vec<Option<Vec<Event>>> = stream::iter(sources.iter().cloned())
            .map(|source_id| async move { self.query_source(&source_id, window).await })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let failed_sources = per_source.iter().filter(|r| r.is_none()).count();
        let mut merged: Vec<Event> = per_source.into_iter().flatten().flatten().collect();
        let fetched = merged.len();

        if !window.is_relative_now() {
            let date = window.resolved_date();
            merged.retain(|event| event.start.date() == date);
        }

        // Same event reachable through two calendars
        let mut seen = HashSet::new();
        merged.retain(|event| {
            event.id.is_empty() || seen.insert((event.id.clone(), event.effective_start()))
        });
        let kept = merged.len();

        let result = AggregatedResult::from_events(merged, self.max_results);

        info!(
            sources = sources.len(),
            failed_sources,
            fetched,
            kept,
            returned = result.len(),
            is_relative_now = window.is_relative_now(),
            "calendar aggregation complete"
        );
        result
    }

    async fn query_source(&self, source_id: &str, window: &ResolvedWindow) -> Option<Vec<Event>> {
        let query = self.calendar.list_events(source_id, window.start(), window.end());

        match tokio::time::timeout(self.source_timeout, query).await {
            Ok(Ok(events)) => {
                debug!(source_id, count = events.len(), "calendar source answered");
                Some(events)
            }
            Ok(Err(err)) => {
                warn!(source_id, error = %err, "calendar source failed, excluding it");
                None
            }
            Err(_) => {
                warn!(
                    source_id,
                    timeout_ms = self.source_timeout.as_millis() as u64,
                    "calendar source timed out, excluding it"
                );
                None
            }
        }
    }
}
