//! Port interfaces for availability decisions

use async_trait::async_trait;
use awaydesk_domain::{parse_time_expression, ParsedExpression, Presence, Result};
use chrono::{DateTime, Utc};

pub use crate::calendar_ports::CalendarQueryService;

/// Trait for translating free text into English
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate `text` from an auto-detected language into English.
    async fn translate_to_english(&self, text: &str) -> Result<String>;
}

/// Trait for looking up whether a user is active on the chat transport
#[async_trait]
pub trait PresenceService: Send + Sync {
    async fn get_presence(&self, user_id: &str) -> Result<Presence>;
}

/// Trait for natural-language date parsing
pub trait DateParser: Send + Sync {
    /// Parse `text` anchored at `reference`.
    fn parse(&self, text: &str, reference: DateTime<Utc>) -> ParsedExpression;
}

/// [`DateParser`] backed by the built-in English grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarDateParser;

impl DateParser for GrammarDateParser {
    fn parse(&self, text: &str, reference: DateTime<Utc>) -> ParsedExpression {
        parse_time_expression(text, reference.naive_utc())
    }
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock [`Clock`] used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
