use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use awaydesk_core::CalendarQueryService;
use awaydesk_domain::{AwayDeskError, Event, Result as DomainResult};
use chrono::{DateTime, Utc};

/// How a mocked source answers.
#[derive(Clone)]
enum SourceBehaviour {
    Fail,
    Hang,
    Delay(Duration),
}

/// In-memory mock for `CalendarQueryService`.
///
/// Holds events per source and returns those overlapping the requested
/// window, ordered by start. Sources can be told to fail, hang, or answer
/// late. Every query is recorded.
#[derive(Default, Clone)]
pub struct MockCalendar {
    events: Arc<Mutex<HashMap<String, Vec<Event>>>>,
    behaviour: Arc<Mutex<HashMap<String, SourceBehaviour>>>,
    queries: Arc<Mutex<Vec<(String, DateTime<Utc>, DateTime<Utc>)>>>,
}

impl MockCalendar {
    /// Convenience helper for adding a single event to its source.
    pub fn with_event(self, event: Event) -> Self {
        self.add_event(event);
        self
    }

    pub fn add_event(&self, event: Event) {
        self.events.lock().unwrap().entry(event.source_id.clone()).or_default().push(event);
    }

    /// Make every query against `source_id` fail.
    pub fn failing(self, source_id: &str) -> Self {
        self.set(source_id, SourceBehaviour::Fail);
        self
    }

    /// Make every query against `source_id` never complete.
    pub fn hanging(self, source_id: &str) -> Self {
        self.set(source_id, SourceBehaviour::Hang);
        self
    }

    /// Delay answers from `source_id`.
    pub fn delayed(self, source_id: &str, delay: Duration) -> Self {
        self.set(source_id, SourceBehaviour::Delay(delay));
        self
    }

    pub fn queries(&self) -> Vec<(String, DateTime<Utc>, DateTime<Utc>)> {
        self.queries.lock().unwrap().clone()
    }

    fn set(&self, source_id: &str, behaviour: SourceBehaviour) {
        self.behaviour.lock().unwrap().insert(source_id.to_string(), behaviour);
    }
}

#[async_trait]
impl CalendarQueryService for MockCalendar {
    async fn list_events(
        &self,
        source_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> DomainResult<Vec<Event>> {
        self.queries.lock().unwrap().push((source_id.to_string(), time_min, time_max));

        let behaviour = self.behaviour.lock().unwrap().get(source_id).cloned();
        match behaviour {
            Some(SourceBehaviour::Fail) => {
                return Err(AwayDeskError::Calendar(format!("{source_id} unavailable")));
            }
            Some(SourceBehaviour::Hang) => futures::future::pending::<()>().await,
            Some(SourceBehaviour::Delay(delay)) => tokio::time::sleep(delay).await,
            None => {}
        }

        let mut events: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .get(source_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.effective_start() < time_max && e.effective_end() > time_min)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        events.sort_by_key(Event::effective_start);
        Ok(events)
    }
}
