use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use awaydesk_core::{Clock, PresenceService, ReplySink, TranslationService};
use awaydesk_domain::{AwayDeskError, OutboundReply, Presence, Result as DomainResult};
use chrono::{DateTime, Duration, Utc};

/// Translator returning canned translations, or the input unchanged.
#[derive(Default)]
pub struct MockTranslator {
    dictionary: HashMap<String, String>,
    fail: bool,
}

impl MockTranslator {
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn with_translation(mut self, from: &str, to: &str) -> Self {
        self.dictionary.insert(from.to_string(), to.to_string());
        self
    }
}

#[async_trait]
impl TranslationService for MockTranslator {
    async fn translate_to_english(&self, text: &str) -> DomainResult<String> {
        if self.fail {
            return Err(AwayDeskError::Translation("translator offline".into()));
        }
        Ok(self.dictionary.get(text).cloned().unwrap_or_else(|| text.to_string()))
    }
}

/// Presence mock with a switchable answer and a call counter.
pub struct MockPresence {
    online: AtomicBool,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl MockPresence {
    pub fn offline() -> Self {
        Self { online: AtomicBool::new(false), fail: AtomicBool::new(false), calls: AtomicUsize::new(0) }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PresenceService for MockPresence {
    async fn get_presence(&self, _user_id: &str) -> DomainResult<Presence> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AwayDeskError::Presence("lookup failed".into()));
        }
        Ok(Presence { online: self.online.load(Ordering::SeqCst) })
    }
}

/// Clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Reply sink that keeps everything it is given.
#[derive(Default, Clone)]
pub struct RecordingSink {
    replies: Arc<Mutex<Vec<OutboundReply>>>,
}

impl RecordingSink {
    pub fn replies(&self) -> Vec<OutboundReply> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_reply(&self, reply: OutboundReply) -> DomainResult<()> {
        self.replies.lock().unwrap().push(reply);
        Ok(())
    }
}
