//! Conversion of Google Calendar payload items into domain events
//!
//! Malformed items are reported as [`EventParseFailure`] so the caller can log
//! and skip them without failing the page.

use awaydesk_domain::constants::UNTITLED_EVENT_SUMMARY;
use awaydesk_domain::{Event, EventTime};
use chrono::{DateTime, NaiveDate, Utc};

use super::types::{EventDateTime, GoogleCalendarEvent};

#[derive(Debug)]
pub struct EventParseFailure {
    pub event_id: String,
    pub field: &'static str,
    pub reason: String,
}

impl EventParseFailure {
    fn new(event_id: &str, field: &'static str, reason: String) -> Self {
        Self { event_id: event_id.to_string(), field, reason }
    }
}

/// Whether the item is a cancelled occurrence that should not be shown.
pub fn is_cancelled(raw: &GoogleCalendarEvent) -> bool {
    raw.status.as_deref().is_some_and(|status| status.eq_ignore_ascii_case("cancelled"))
}

/// Validate one payload item and tag it with `source_id`.
pub fn convert_provider_event(
    raw: GoogleCalendarEvent,
    source_id: &str,
) -> Result<Event, EventParseFailure> {
    let event_id = raw.id.unwrap_or_default();

    let start = parse_event_time(raw.start.as_ref())
        .map_err(|reason| EventParseFailure::new(&event_id, "start", reason))?;
    let end = parse_event_time(raw.end.as_ref())
        .map_err(|reason| EventParseFailure::new(&event_id, "end", reason))?;

    if end.effective_start() < start.effective_start() {
        return Err(EventParseFailure::new(&event_id, "end", "end precedes start".to_string()));
    }

    let summary = raw
        .summary
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNTITLED_EVENT_SUMMARY.to_string());

    Ok(Event { id: event_id, source_id: source_id.to_string(), start, end, summary })
}

fn parse_event_time(value: Option<&EventDateTime>) -> Result<EventTime, String> {
    let value = value.ok_or_else(|| "missing".to_string())?;

    if let Some(date_time) = value.date_time.as_deref().filter(|s| !s.trim().is_empty()) {
        return parse_event_timestamp(date_time).map(EventTime::Instant);
    }
    if let Some(date) = value.date.as_deref().filter(|s| !s.trim().is_empty()) {
        return parse_all_day_date(date).map(EventTime::AllDay);
    }
    Err("neither dateTime nor date present".to_string())
}

fn parse_all_day_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid all-day date '{value}': {e}"))
}

/// RFC 3339 timestamp; a missing offset is read as UTC.
fn parse_event_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = value.trim();
    let has_explicit_timezone = trimmed.ends_with('Z')
        || trimmed
            .rfind('T')
            .is_some_and(|idx| trimmed[idx + 1..].chars().any(|c| matches!(c, '+' | '-')));

    let candidate = if has_explicit_timezone { trimmed.to_string() } else { format!("{trimmed}Z") };

    DateTime::parse_from_rfc3339(&candidate)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{value}': {e}"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn timed(start: &str, end: &str) -> GoogleCalendarEvent {
        GoogleCalendarEvent {
            id: Some("evt-1".into()),
            status: Some("confirmed".into()),
            summary: Some("Standup".into()),
            start: Some(EventDateTime { date_time: Some(start.into()), date: None }),
            end: Some(EventDateTime { date_time: Some(end.into()), date: None }),
        }
    }

    #[test]
    fn converts_timed_event_with_offset() {
        let event =
            convert_provider_event(timed("2026-10-16T12:00:00+02:00", "2026-10-16T13:00:00+02:00"), "work")
                .unwrap();

        assert_eq!(event.source_id, "work");
        assert_eq!(
            event.start,
            EventTime::Instant(Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn timestamp_without_offset_is_utc() {
        let event =
            convert_provider_event(timed("2026-10-16T09:00:00", "2026-10-16T09:30:00"), "work")
                .unwrap();
        assert_eq!(event.effective_start(), Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap());
    }

    #[test]
    fn converts_all_day_event() {
        let raw = GoogleCalendarEvent {
            id: Some("holiday".into()),
            start: Some(EventDateTime { date_time: None, date: Some("2026-10-16".into()) }),
            end: Some(EventDateTime { date_time: None, date: Some("2026-10-17".into()) }),
            ..GoogleCalendarEvent::default()
        };

        let event = convert_provider_event(raw, "team").unwrap();

        assert_eq!(event.start, EventTime::AllDay(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()));
        assert_eq!(event.summary, UNTITLED_EVENT_SUMMARY);
    }

    #[test]
    fn blank_summary_becomes_untitled() {
        let mut raw = timed("2026-10-16T09:00:00Z", "2026-10-16T09:30:00Z");
        raw.summary = Some("   ".into());
        assert_eq!(convert_provider_event(raw, "work").unwrap().summary, UNTITLED_EVENT_SUMMARY);
    }

    #[test]
    fn rejects_missing_start() {
        let mut raw = timed("2026-10-16T09:00:00Z", "2026-10-16T09:30:00Z");
        raw.start = None;

        let failure = convert_provider_event(raw, "work").unwrap_err();
        assert_eq!(failure.field, "start");
        assert_eq!(failure.event_id, "evt-1");
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let failure =
            convert_provider_event(timed("tomorrow-ish", "2026-10-16T09:30:00Z"), "work").unwrap_err();
        assert_eq!(failure.field, "start");
        assert!(failure.reason.contains("tomorrow-ish"));
    }

    #[test]
    fn rejects_end_before_start() {
        let failure =
            convert_provider_event(timed("2026-10-16T10:00:00Z", "2026-10-16T09:00:00Z"), "work")
                .unwrap_err();
        assert_eq!(failure.field, "end");
    }

    #[test]
    fn detects_cancelled_items() {
        let mut raw = timed("2026-10-16T10:00:00Z", "2026-10-16T11:00:00Z");
        assert!(!is_cancelled(&raw));
        raw.status = Some("cancelled".into());
        assert!(is_cancelled(&raw));
    }
}
