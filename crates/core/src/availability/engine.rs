//! Availability decision engine
//!
//! Runs one evaluation per inbound message:
//!
//! 1. Group chats and the owner's own messages get no reply.
//! 2. A message with a time expression is answered with the schedule for that
//!    window, or the "no commitments" reply when it is empty.
//! 3. Anything else falls back to a busy probe over `[now, now + 1min)`. If
//!    the owner is in an event, offline (or unknown), and the shared cooldown
//!    has elapsed, a busy notice goes out.
//!
//! Presence and cooldown only ever apply on the busy-probe path.

use std::sync::Arc;

use awaydesk_domain::{
    AssistantConfig, DecisionOutcome, InboundMessage, NoReplyReason, ResolvedWindow,
};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use super::aggregator::EventAggregator;
use super::ports::{Clock, PresenceService};
use super::resolver::TimeExpressionResolver;

/// Process-wide record of the last busy notice.
///
/// Shared by every evaluation and never keyed by requester. Reset only by a
/// restart.
#[derive(Debug, Default)]
pub struct CooldownState {
    last_busy_reply: Mutex<Option<DateTime<Utc>>>,
}

impl CooldownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_busy_reply(&self) -> Option<DateTime<Utc>> {
        *self.last_busy_reply.lock()
    }

    /// Claim the right to send a busy notice at `now`.
    ///
    /// Succeeds and records `now` when at least `cooldown` has passed since
    /// the last claim (or there was none). The check and the update happen
    /// under one lock, so two concurrent probes cannot both succeed.
    pub fn try_claim(&self, now: DateTime<Utc>, cooldown: Duration) -> bool {
        let mut last = self.last_busy_reply.lock();
        let elapsed = last.map_or(true, |previous| now - previous >= cooldown);
        if elapsed {
            *last = Some(now);
        }
        elapsed
    }
}

/// Orchestrates resolver, aggregator, presence, and cooldown into a
/// [`DecisionOutcome`].
pub struct DecisionEngine {
    resolver: TimeExpressionResolver,
    aggregator: EventAggregator,
    presence: Arc<dyn PresenceService>,
    clock: Arc<dyn Clock>,
    cooldown: Arc<CooldownState>,
    owner_user_id: String,
    sources: Vec<String>,
    cooldown_period: Duration,
}

impl DecisionEngine {
    pub fn new(
        config: &AssistantConfig,
        resolver: TimeExpressionResolver,
        aggregator: EventAggregator,
        presence: Arc<dyn PresenceService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resolver,
            aggregator,
            presence,
            clock,
            cooldown: Arc::new(CooldownState::new()),
            owner_user_id: config.owner_user_id.clone(),
            sources: config.calendar_source_ids.clone(),
            cooldown_period: Duration::from_std(config.cooldown())
                .unwrap_or_else(|_| Duration::days(365_000)),
        }
    }

    /// Share an existing cooldown record instead of a fresh one.
    pub fn with_cooldown_state(mut self, cooldown: Arc<CooldownState>) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Decide how to answer `message`.
    #[instrument(name = "evaluate_message", skip_all, fields(sender_id = %message.sender_id))]
    pub async fn evaluate(&self, message: &InboundMessage) -> DecisionOutcome {
        let outcome = self.decide(message).await;
        match &outcome {
            DecisionOutcome::NoReply { reason } => {
                info!(outcome = outcome.label(), ?reason, "decision reached");
            }
            DecisionOutcome::ReplySchedule { events } => {
                info!(outcome = outcome.label(), events = events.len(), "decision reached");
            }
            DecisionOutcome::ReplyBusy { until } => {
                info!(outcome = outcome.label(), %until, "decision reached");
            }
            DecisionOutcome::ReplyNoEvents => {
                info!(outcome = outcome.label(), "decision reached");
            }
        }
        outcome
    }

    async fn decide(&self, message: &InboundMessage) -> DecisionOutcome {
        if !message.is_private() {
            return DecisionOutcome::no_reply(NoReplyReason::GroupChat);
        }
        if message.sender_id == self.owner_user_id {
            return DecisionOutcome::no_reply(NoReplyReason::OwnMessage);
        }

        let now = self.clock.now();
        match self.resolver.resolve(&message.text, now).await {
            Ok(window) => self.answer_schedule(&window).await,
            Err(failure) => {
                debug!(%failure, "no explicit date, probing for a current event");
                self.probe_busy(now).await
            }
        }
    }

    async fn answer_schedule(&self, window: &ResolvedWindow) -> DecisionOutcome {
        let events = self.aggregator.aggregate(&self.sources, window).await;
        if events.is_empty() {
            DecisionOutcome::ReplyNoEvents
        } else {
            DecisionOutcome::ReplySchedule { events }
        }
    }

    async fn probe_busy(&self, now: DateTime<Utc>) -> DecisionOutcome {
        let probe = ResolvedWindow::busy_probe(now);
        let current = self.aggregator.aggregate(&self.sources, &probe).await;
        let Some(until) = current.first().map(|event| event.effective_end()) else {
            return DecisionOutcome::no_reply(NoReplyReason::NotBusy);
        };

        if self.owner_online().await {
            return DecisionOutcome::no_reply(NoReplyReason::OwnerOnline);
        }

        if !self.cooldown.try_claim(now, self.cooldown_period) {
            return DecisionOutcome::no_reply(NoReplyReason::CooldownActive);
        }

        DecisionOutcome::ReplyBusy { until }
    }

    /// Presence lookup failures count as offline so the busy notice still
    /// goes out.
    async fn owner_online(&self) -> bool {
        match self.presence.get_presence(&self.owner_user_id).await {
            Ok(presence) => presence.online,
            Err(err) => {
                warn!(error = %err, "presence lookup failed, treating owner as offline");
                false
            }
        }
    }
}
