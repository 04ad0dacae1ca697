//! # AwayDesk Core
//!
//! Availability logic for answering schedule questions on behalf of an
//! absent owner - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for translation, calendars, presence, clocks,
//!   and reply delivery
//! - The time expression resolver, event aggregator, decision engine, and
//!   response formatter
//! - The assistant service tying them to inbound messages
//!
//! ## Architecture Principles
//! - Only depends on `awaydesk-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod assistant;
pub mod availability;
pub mod calendar_ports;

pub use assistant::{AssistantService, ReplySink};
pub use availability::{
    Clock, CooldownState, DateParser, DecisionEngine, EventAggregator, GrammarDateParser,
    PresenceService, ResolveFailure, ResponseFormatter, SystemClock, TimeExpressionResolver,
    TranslationService,
};
pub use calendar_ports::CalendarQueryService;
