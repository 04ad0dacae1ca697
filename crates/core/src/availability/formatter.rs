//! Reply text for each decision outcome

use awaydesk_domain::{AggregatedResult, DecisionOutcome};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Renders decision outcomes as the fixed reply templates.
///
/// Times are shown in `tz`; the owner is named by display name only.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    owner_display_name: String,
    tz: Tz,
}

impl ResponseFormatter {
    pub fn new(owner_display_name: impl Into<String>, tz: Tz) -> Self {
        Self { owner_display_name: owner_display_name.into(), tz }
    }

    /// Reply text for `outcome`, or `None` when nothing should be sent.
    pub fn render(&self, outcome: &DecisionOutcome) -> Option<String> {
        match outcome {
            DecisionOutcome::ReplySchedule { events } => Some(self.format_schedule(events)),
            DecisionOutcome::ReplyNoEvents => Some(self.format_no_events()),
            DecisionOutcome::ReplyBusy { until } => Some(self.format_busy(*until)),
            DecisionOutcome::NoReply { .. } => None,
        }
    }

    /// Header line followed by `"<start> - <summary>"` per event, in order.
    ///
    /// An empty result renders as the no-commitments sentence.
    pub fn format_schedule(&self, events: &AggregatedResult) -> String {
        if events.is_empty() {
            return self.format_no_events();
        }

        let mut text = format!(
            "Hi, I am {}'s virtual assistant, here is the schedule:\n",
            self.owner_display_name
        );
        for event in events {
            text.push_str(&event.start.to_display_string(self.tz));
            text.push_str(" - ");
            text.push_str(&event.summary);
            text.push('\n');
        }
        text
    }

    pub fn format_no_events(&self) -> String {
        format!(
            "Hi, I am {}'s virtual assistant. {} does not currently have any commitments on the schedule.",
            self.owner_display_name, self.owner_display_name
        )
    }

    pub fn format_busy(&self, until: DateTime<Utc>) -> String {
        format!(
            "Hi, I am {}'s virtual assistant. {} is currently busy with another event, but will be free after {}.",
            self.owner_display_name,
            self.owner_display_name,
            until.with_timezone(&self.tz).format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use awaydesk_domain::{Event, EventTime, NoReplyReason};
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    fn formatter() -> ResponseFormatter {
        ResponseFormatter::new("Alex", Tz::UTC)
    }

    fn timed(summary: &str, hour: u32) -> Event {
        Event {
            id: summary.to_lowercase(),
            source_id: "primary".into(),
            start: EventTime::Instant(Utc.with_ymd_and_hms(2026, 10, 16, hour, 0, 0).unwrap()),
            end: EventTime::Instant(Utc.with_ymd_and_hms(2026, 10, 16, hour + 1, 0, 0).unwrap()),
            summary: summary.into(),
        }
    }

    #[test]
    fn schedule_lists_events_in_order() {
        let all_day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let events = AggregatedResult::from_events(
            vec![
                timed("Standup", 10),
                Event {
                    id: "offsite".into(),
                    source_id: "team".into(),
                    start: EventTime::AllDay(all_day),
                    end: EventTime::AllDay(all_day.succ_opt().unwrap()),
                    summary: "Offsite".into(),
                },
            ],
            10,
        );

        let text = formatter().format_schedule(&events);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Hi, I am Alex's virtual assistant, here is the schedule:");
        assert_eq!(lines[1], "2026-10-16 - Offsite");
        assert_eq!(lines[2], "2026-10-16T10:00:00+00:00 - Standup");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn no_events_names_the_owner() {
        let text = formatter().format_no_events();
        assert!(text.contains("Alex does not currently have any commitments"));
    }

    #[test]
    fn busy_uses_display_timezone() {
        let until = Utc.with_ymd_and_hms(2026, 10, 16, 13, 30, 0).unwrap();

        assert!(formatter().format_busy(until).ends_with("free after 13:30."));

        let rome = ResponseFormatter::new("Alex", chrono_tz::Europe::Rome);
        assert!(rome.format_busy(until).ends_with("free after 15:30."));
    }

    #[test]
    fn no_reply_renders_nothing() {
        let outcome = DecisionOutcome::no_reply(NoReplyReason::CooldownActive);
        assert_eq!(formatter().render(&outcome), None);
        assert!(formatter().render(&DecisionOutcome::ReplyNoEvents).is_some());
    }
}
