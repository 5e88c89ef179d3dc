//! Date capture from free text, with iCalendar export.
//!
//! Scans page text for deadline-like dates ("Due: Jan 15", "2025-02-14",
//! "02/14/2025", "March 3rd") so they can be turned into agenda items or
//! downloaded as an `.ics` file.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::schedule::{ItemId, ItemKind, ItemStatus, ScheduleItem};

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec";

const CONTEXT_BEFORE: usize = 80;
const CONTEXT_AFTER: usize = 60;
const CONTEXT_MAX: usize = 120;
const TITLE_MAX: usize = 60;
const DEDUP_TITLE_CHARS: usize = 30;

/// A date found in text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedDate {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub end: NaiveDateTime,
    /// Snippet of the surrounding text
    pub context: String,
}

impl CapturedDate {
    /// Midnight of the captured day
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(chrono::NaiveTime::MIN)
    }

    /// Convert into a pending local event, reading the naive times as UTC.
    pub fn to_schedule_item(&self, owner_id: &str) -> ScheduleItem {
        ScheduleItem {
            id: ItemId::Local(self.id.clone()),
            owner_id: owner_id.to_string(),
            title: self.title.clone(),
            description: Some(self.context.clone()),
            start_time: self.start().and_utc(),
            end_time: self.end.and_utc(),
            status: ItemStatus::Pending,
            kind: ItemKind::Event,
            external_ref: None,
        }
    }
}

#[derive(Clone, Copy)]
enum DateShape {
    /// "due: Jan 15, 2025"
    KeywordMonthDay,
    /// "2025-02-14"
    Iso,
    /// "02/14/2025", "2/14/25"
    Slashed,
    /// "January 15"
    MonthDay,
}

struct DatePattern {
    regex: Regex,
    shape: DateShape,
}

fn patterns() -> &'static [DatePattern] {
    static PATTERNS: OnceLock<Vec<DatePattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let month_day = format!(r"({MONTHS})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s*(\d{{4}})?");
        let build = |src: &str, shape| DatePattern {
            regex: Regex::new(src).expect("date pattern is a valid regex"),
            shape,
        };
        vec![
            build(
                &format!(r"(?i)(?:due|deadline|by|on|date)\s*:?\s*{month_day}"),
                DateShape::KeywordMonthDay,
            ),
            build(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b", DateShape::Iso),
            build(r"\b(\d{1,2})/(\d{1,2})/(\d{2,4})\b", DateShape::Slashed),
            build(&format!("(?i){month_day}"), DateShape::MonthDay),
        ]
    })
}

/// Scan `text` for dates on or after `today`.
///
/// Results are deduplicated by day plus the start of the title and sorted
/// by date. Each capture spans one hour from midnight of its day.
pub fn detect_dates_in_text(
    text: &str,
    page_title: Option<&str>,
    today: NaiveDate,
) -> Vec<CapturedDate> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for pattern in patterns() {
        for caps in pattern.regex.captures_iter(&normalized) {
            let Some(date) = extract_date(&caps, pattern.shape, today.year()) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };

            let context = context_snippet(&normalized, whole.start(), whole.end());
            let title: String = context.chars().take(TITLE_MAX).collect();

            let key = (
                date,
                title.chars().take(DEDUP_TITLE_CHARS).collect::<String>(),
            );
            if !seen.insert(key) || date < today {
                continue;
            }

            let title = if title.is_empty() {
                page_title.unwrap_or("Captured event").to_string()
            } else {
                title
            };

            let start = date.and_time(chrono::NaiveTime::MIN);
            results.push(CapturedDate {
                id: format!("cap-{}", results.len()),
                title,
                date,
                end: start + Duration::hours(1),
                context,
            });
        }
    }

    results.sort_by_key(|c| c.date);
    results
}

fn extract_date(caps: &Captures<'_>, shape: DateShape, default_year: i32) -> Option<NaiveDate> {
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i32>().ok());

    match shape {
        DateShape::KeywordMonthDay | DateShape::MonthDay => {
            let month = parse_month(caps.get(1)?.as_str())?;
            let day = num(2)?;
            let year = num(3).unwrap_or(default_year);
            NaiveDate::from_ymd_opt(year, month, u32::try_from(day).ok()?)
        }
        DateShape::Iso => {
            let month = u32::try_from(num(2)?).ok()?;
            let day = u32::try_from(num(3)?).ok()?;
            NaiveDate::from_ymd_opt(num(1)?, month, day)
        }
        DateShape::Slashed => {
            let month = u32::try_from(num(1)?).ok()?;
            let day = u32::try_from(num(2)?).ok()?;
            let mut year = num(3)?;
            if year < 100 {
                year += if year < 50 { 2000 } else { 1900 };
            }
            NaiveDate::from_ymd_opt(year, month, day)
        }
    }
}

fn parse_month(s: &str) -> Option<u32> {
    let month = match s.trim().to_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Up to 80 chars before and 60 after the match, whitespace-collapsed.
fn context_snippet(text: &str, start: usize, end: usize) -> String {
    let start_char = text[..start].chars().count();
    let end_char = start_char + text[start..end].chars().count();
    let from = start_char.saturating_sub(CONTEXT_BEFORE);
    let to = end_char + CONTEXT_AFTER;

    let raw: String = text.chars().skip(from).take(to - from).collect();
    let snippet = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if snippet.is_empty() {
        return "Detected date".to_string();
    }
    if snippet.chars().count() > CONTEXT_MAX {
        let mut cut: String = snippet.chars().take(CONTEXT_MAX - 3).collect();
        cut.push_str("...");
        return cut;
    }
    snippet
}

/// Render captures as an iCalendar file Google Calendar can import.
///
/// Naive capture times are written as UTC. `stamp` fills `DTSTAMP`.
pub fn build_ics(items: &[CapturedDate], stamp: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Orbit//Capture//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for item in items {
        let start = item.start().and_utc();
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}-{}@orbit", item.id, start.timestamp_millis()));
        lines.push(format!("DTSTAMP:{}", ics_datetime(stamp)));
        lines.push(format!("DTSTART:{}", ics_datetime(start)));
        lines.push(format!("DTEND:{}", ics_datetime(item.end.and_utc())));
        lines.push(format!("SUMMARY:{}", ics_escape(&item.title)));
        lines.push(format!("DESCRIPTION:{}", ics_escape(&item.context)));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    lines.join("\r\n")
}

fn ics_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

fn ics_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date() {
        let found = detect_dates_in_text("Launch party on 2025-02-14 downtown", None, today());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].date, ymd(2025, 2, 14));
        assert_eq!(found[0].end, ymd(2025, 2, 14).and_hms_opt(1, 0, 0).unwrap());
        assert!(found[0].context.contains("Launch party"));
    }

    #[test]
    fn test_slashed_dates_are_month_first() {
        let found = detect_dates_in_text("Submit by 02/14/25", None, today());
        assert_eq!(found[0].date, ymd(2025, 2, 14));

        let found = detect_dates_in_text("Reunion 3/1/2026", None, today());
        assert_eq!(found[0].date, ymd(2026, 3, 1));
    }

    #[test]
    fn test_month_names_default_to_current_year() {
        let found = detect_dates_in_text("Deadline: March 3rd", None, today());
        assert!(!found.is_empty());
        assert!(found.iter().all(|c| c.date == ymd(2025, 3, 3)));
    }

    #[test]
    fn test_january_is_a_valid_month() {
        let found = detect_dates_in_text("Exam jan. 20, 2026", None, today());
        assert_eq!(found[0].date, ymd(2026, 1, 20));
    }

    #[test]
    fn test_past_and_invalid_dates_dropped() {
        let found = detect_dates_in_text("Old 2024-12-01, bogus 2025-02-30", None, today());
        assert!(found.is_empty());
    }

    #[test]
    fn test_results_sorted_and_deduplicated() {
        let text = "Second 2025-06-01. First 2025-03-01.";
        let found = detect_dates_in_text(text, None, today());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, ymd(2025, 3, 1));
        assert_eq!(found[1].date, ymd(2025, 6, 1));
        assert_ne!(found[0].id, found[1].id);
    }

    #[test]
    fn test_long_context_is_truncated() {
        let filler = "word ".repeat(60);
        let text = format!("{filler}due Apr 2 {filler}");
        let found = detect_dates_in_text(&text, None, today());
        let ctx = &found[0].context;
        assert_eq!(ctx.chars().count(), CONTEXT_MAX);
        assert!(ctx.ends_with("..."));
        assert_eq!(found[0].title.chars().count(), TITLE_MAX);
    }

    #[test]
    fn test_ics_layout_and_escaping() {
        let capture = CapturedDate {
            id: "cap-0".into(),
            title: "Pay rent; landlord, inc".into(),
            date: ymd(2025, 2, 14),
            end: ymd(2025, 2, 14).and_hms_opt(1, 0, 0).unwrap(),
            context: "line\\one\nline two".into(),
        };
        let stamp = Utc.with_ymd_and_hms(2025, 1, 10, 12, 30, 5).unwrap();
        let ics = build_ics(&[capture], stamp);
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines.first(), Some(&"BEGIN:VCALENDAR"));
        assert_eq!(lines.last(), Some(&"END:VCALENDAR"));
        assert!(lines.contains(&"DTSTAMP:20250110T123005Z"));
        assert!(lines.contains(&"DTSTART:20250214T000000Z"));
        assert!(lines.contains(&"DTEND:20250214T010000Z"));
        assert!(lines.contains(&"SUMMARY:Pay rent\\; landlord\\, inc"));
        assert!(lines.contains(&"DESCRIPTION:line\\\\one\\nline two"));
        assert!(lines.iter().any(|l| l.starts_with("UID:cap-0-") && l.ends_with("@orbit")));
    }

    #[test]
    fn test_to_schedule_item() {
        let found = detect_dates_in_text("Dentist 2025-05-05", None, today());
        let item = found[0].to_schedule_item("u1");
        assert_eq!(item.kind, ItemKind::Event);
        assert_eq!(item.duration_minutes(), 60);
        assert_eq!(item.start_time, Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap());
    }
}
