//! Shared test helpers for `awaydesk-core` integration tests.
//!
//! In-memory mocks of every port so tests can focus on decisions instead of
//! wiring.

#![allow(dead_code)]

pub mod calendar;
pub mod collaborators;

use std::sync::Arc;

use awaydesk_core::{
    AssistantService, CooldownState, DecisionEngine, EventAggregator, GrammarDateParser, ResponseFormatter,
    TimeExpressionResolver,
};
use awaydesk_domain::{AssistantConfig, Event, EventTime};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub use calendar::MockCalendar;
pub use collaborators::{FixedClock, MockPresence, MockTranslator, RecordingSink};

pub const OWNER_ID: &str = "owner-1";
pub const REQUESTER_ID: &str = "friend-7";

/// Friday 2026-10-16 at `hour:minute` UTC.
pub fn today_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, hour, minute, 0).unwrap()
}

pub fn timed_event(
    id: &str,
    source_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    summary: &str,
) -> Event {
    Event {
        id: id.to_string(),
        source_id: source_id.to_string(),
        start: EventTime::Instant(start),
        end: EventTime::Instant(end),
        summary: summary.to_string(),
    }
}

pub fn assistant_config(sources: &[&str]) -> AssistantConfig {
    AssistantConfig::new(OWNER_ID, "Alex").with_sources(sources.iter().copied())
}

/// Everything an end-to-end test needs to poke at.
pub struct Harness {
    pub calendar: Arc<MockCalendar>,
    pub presence: Arc<MockPresence>,
    pub clock: Arc<FixedClock>,
    pub sink: Arc<RecordingSink>,
    pub cooldown: Arc<CooldownState>,
    pub service: AssistantService,
}

impl Harness {
    pub fn new(config: &AssistantConfig, now: DateTime<Utc>) -> Self {
        let calendar = Arc::new(MockCalendar::default());
        let presence = Arc::new(MockPresence::offline());
        let clock = Arc::new(FixedClock::new(now));
        let sink = Arc::new(RecordingSink::default());
        let cooldown = Arc::new(CooldownState::new());

        let resolver = TimeExpressionResolver::new(
            Arc::new(MockTranslator::passthrough()),
            Arc::new(GrammarDateParser),
            config.now_window_minutes,
        );
        let aggregator = EventAggregator::new(calendar.clone(), config.max_results);
        let engine =
            DecisionEngine::new(config, resolver, aggregator, presence.clone(), clock.clone())
                .with_cooldown_state(cooldown.clone());
        let formatter = ResponseFormatter::new(config.owner_display_name.clone(), Tz::UTC);
        let service = AssistantService::new(engine, formatter, sink.clone());

        Self { calendar, presence, clock, sink, cooldown, service }
    }
}
