//! Time expression resolver - free text to a concrete UTC window

use std::sync::Arc;

use awaydesk_domain::ResolvedWindow;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use super::ports::{DateParser, TranslationService};

/// Why a message could not be turned into a window.
///
/// Not an error for the user: the engine routes both cases to the busy probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveFailure {
    #[error("message text is empty")]
    EmptyInput,
    #[error("no time expression recognised")]
    NoTimeExpression,
}

/// Translates, parses, and turns a message into a [`ResolvedWindow`].
pub struct TimeExpressionResolver {
    translator: Arc<dyn TranslationService>,
    parser: Arc<dyn DateParser>,
    now_window_minutes: i64,
}

impl TimeExpressionResolver {
    pub fn new(
        translator: Arc<dyn TranslationService>,
        parser: Arc<dyn DateParser>,
        now_window_minutes: i64,
    ) -> Self {
        Self { translator, parser, now_window_minutes }
    }

    /// Resolve `text` against the reference instant `now`.
    ///
    /// Any text whose English form contains "now" (case-insensitive, anywhere)
    /// resolves to `[now, now + now_window_minutes)` whatever the parser says.
    /// Otherwise a parsed date `D` resolves to `[D 00:00:00Z, D 23:59:59Z]`.
    pub async fn resolve(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<ResolvedWindow, ResolveFailure> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ResolveFailure::EmptyInput);
        }

        let (normalized, translated) = self.normalize(trimmed).await;
        let parsed = self.parser.parse(&normalized, now);
        let mentions_now = normalized.to_lowercase().contains("now");

        let window = if mentions_now {
            ResolvedWindow::relative_now(now, self.now_window_minutes)
        } else if parsed.is_parsed() {
            ResolvedWindow::whole_day(parsed.date())
        } else {
            debug!(translated, "no time expression in message");
            return Err(ResolveFailure::NoTimeExpression);
        };

        debug!(
            translated,
            is_relative_now = window.is_relative_now(),
            start = %window.start(),
            end = %window.end(),
            "resolved time window"
        );
        Ok(window)
    }

    /// English form of `text`, or `text` itself if translation fails.
    async fn normalize(&self, text: &str) -> (String, bool) {
        match self.translator.translate_to_english(text).await {
            Ok(translated) if !translated.trim().is_empty() => (translated, true),
            Ok(_) => (text.to_string(), false),
            Err(err) => {
                debug!(error = %err, "translation failed, using original text");
                (text.to_string(), false)
            }
        }
    }
}
