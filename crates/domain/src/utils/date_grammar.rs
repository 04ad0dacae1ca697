//! Rule-based natural-language date/time grammar.
//!
//! Recognises the English expressions people use when asking about someone's
//! schedule ("tomorrow", "next friday", "on 12/3", "March 4th at 3pm", "now")
//! and anchors them to a reference date-time. Mirrors the status codes of a
//! classic `parse` API: nothing found, date only, time only, or both.
//!
//! Components that the text does not mention are taken from the reference,
//! so "3pm" means today at 15:00 and "tomorrow" keeps the reference time.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Which parts of a date-time the grammar found in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    NotParsed,
    Date,
    Time,
    DateTime,
}

impl ParseStatus {
    fn from_parts(has_date: bool, has_time: bool) -> Self {
        match (has_date, has_time) {
            (false, false) => Self::NotParsed,
            (true, false) => Self::Date,
            (false, true) => Self::Time,
            (true, true) => Self::DateTime,
        }
    }

    pub fn is_parsed(self) -> bool {
        self != Self::NotParsed
    }
}

/// Result of running the grammar over a piece of text.
///
/// `datetime` equals the reference when nothing was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedExpression {
    pub datetime: NaiveDateTime,
    pub status: ParseStatus,
}

impl ParsedExpression {
    pub fn is_parsed(&self) -> bool {
        self.status.is_parsed()
    }

    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }
}

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("valid regex"));

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2}|\d{4}))?\b").expect("valid regex")
});

const MONTH_ALTERNATION: &str = "january|february|march|april|may|june|july|august|september|\
                                 october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|\
                                 oct|nov|dec";

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b({MONTH_ALTERNATION})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}}))?"
    ))
    .expect("valid regex")
});

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTH_ALTERNATION})\b(?:,?\s+(\d{{4}}))?"
    ))
    .expect("valid regex")
});

static IN_N_UNITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bin\s+(\d{1,3})\s+(days?|weeks?)\b").expect("valid regex"));

static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(next|this|on)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .expect("valid regex")
});

static TIME_12H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})(?::([0-5]\d))?\s*(a\.m\.|p\.m\.|am\b|pm\b)").expect("valid regex")
});

static TIME_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").expect("valid regex"));

static NOW: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(right\s+)?now\b").expect("valid regex"));

/// Parse `text` relative to `reference`.
pub fn parse_time_expression(text: &str, reference: NaiveDateTime) -> ParsedExpression {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return ParsedExpression { datetime: reference, status: ParseStatus::NotParsed };
    }

    if NOW.is_match(&normalized) {
        return ParsedExpression { datetime: reference, status: ParseStatus::DateTime };
    }

    let today = reference.date();
    let date = find_date(&normalized, today);
    let time = find_time(&normalized);

    let status = ParseStatus::from_parts(date.is_some(), time.is_some());
    let datetime = NaiveDateTime::new(date.unwrap_or(today), time.unwrap_or(reference.time()));

    ParsedExpression { datetime, status }
}

fn find_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    absolute_date(text, today).or_else(|| relative_date(text, today))
}

/// First match of each pattern that is a real calendar date; matches that
/// are not ("24/7", "2026-02-31") fall through to the next one.
fn absolute_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    ISO_DATE
        .captures_iter(text)
        .find_map(|cap| {
            NaiveDate::from_ymd_opt(number(&cap, 1)?, number(&cap, 2)?, number(&cap, 3)?)
        })
        .or_else(|| {
            NUMERIC_DATE.captures_iter(text).find_map(|cap| {
                // Month first, as in US usage.
                let year = year_or(&cap, 3, today.year())?;
                NaiveDate::from_ymd_opt(year, number(&cap, 1)?, number(&cap, 2)?)
            })
        })
        .or_else(|| {
            MONTH_DAY.captures_iter(text).find_map(|cap| {
                let month = month_number(cap.get(1)?.as_str())?;
                NaiveDate::from_ymd_opt(year_or(&cap, 3, today.year())?, month, number(&cap, 2)?)
            })
        })
        .or_else(|| {
            DAY_MONTH.captures_iter(text).find_map(|cap| {
                let month = month_number(cap.get(2)?.as_str())?;
                NaiveDate::from_ymd_opt(year_or(&cap, 3, today.year())?, month, number(&cap, 1)?)
            })
        })
}

fn relative_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if text.contains("day after tomorrow") {
        return Some(today + Duration::days(2));
    }
    if text.contains("tomorrow") {
        return Some(today + Duration::days(1));
    }
    if text.contains("yesterday") {
        return Some(today - Duration::days(1));
    }
    if text.contains("today") || text.contains("tonight") {
        return Some(today);
    }

    if let Some(cap) = IN_N_UNITS.captures(text) {
        let amount: i64 = number(&cap, 1)?;
        let unit = cap.get(2)?.as_str();
        let offset =
            if unit.starts_with("week") { Duration::weeks(amount) } else { Duration::days(amount) };
        return Some(today + offset);
    }

    WEEKDAY.captures(text).and_then(|cap| {
        let weekday = weekday_from_name(cap.get(2)?.as_str())?;
        let strictly_after = cap.get(1).is_some_and(|m| m.as_str() == "next");
        Some(upcoming_weekday(today, weekday, strictly_after))
    })
}

fn find_time(text: &str) -> Option<NaiveTime> {
    if let Some(time) = TIME_12H.captures_iter(text).find_map(|cap| {
        let hour: u32 = number(&cap, 1)?;
        let minute: u32 = cap.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if hour == 0 || hour > 12 {
            return None;
        }
        let is_pm = cap.get(3)?.as_str().starts_with('p');
        let hour = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        NaiveTime::from_hms_opt(hour, minute, 0)
    }) {
        return Some(time);
    }

    if let Some(time) = TIME_24H
        .captures_iter(text)
        .find_map(|cap| NaiveTime::from_hms_opt(number(&cap, 1)?, number(&cap, 2)?, 0))
    {
        return Some(time);
    }

    if contains_word(text, "noon") || contains_word(text, "midday") {
        return NaiveTime::from_hms_opt(12, 0, 0);
    }
    if contains_word(text, "midnight") {
        return Some(NaiveTime::MIN);
    }
    None
}

/// Next date falling on `weekday`. Today counts unless `strictly_after`.
fn upcoming_weekday(today: NaiveDate, weekday: Weekday, strictly_after: bool) -> NaiveDate {
    let current = i64::from(today.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());
    let mut ahead = (target - current).rem_euclid(7);
    if ahead == 0 && strictly_after {
        ahead = 7;
    }
    today + Duration::days(ahead)
}

fn number<T: std::str::FromStr>(cap: &Captures<'_>, index: usize) -> Option<T> {
    cap.get(index)?.as_str().parse().ok()
}

fn year_or(cap: &Captures<'_>, index: usize, fallback: i32) -> Option<i32> {
    match cap.get(index) {
        None => Some(fallback),
        Some(m) => {
            let year: i32 = m.as_str().parse().ok()?;
            Some(if m.as_str().len() == 2 { 2000 + year } else { year })
        }
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    name.parse::<Weekday>().ok()
}

fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric()).any(|token| token == word)
}
