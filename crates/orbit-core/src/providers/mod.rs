//! Adapters from each item source into [`ScheduleItem`].
//!
//! Every adapter is a pure, total function: payloads come from the local
//! store or from Google's REST APIs (fetched elsewhere), and anything that
//! cannot be parsed falls back to a sensible value instead of failing.

mod calendar;
mod local;
mod tasks;

pub use calendar::{from_calendar_event, CalendarEvent, EventTime, CALENDAR_TITLE_PREFIX};
pub use local::{from_local_row, LocalRow, RowId};
pub use tasks::{from_google_task, GoogleTask};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use crate::schedule::ScheduleItem;

/// Concatenate the mapped sources in priority order: local, calendar, tasks.
pub fn merge_sources(
    local: &[ScheduleItem],
    calendar: &[ScheduleItem],
    tasks: &[ScheduleItem],
) -> Vec<ScheduleItem> {
    local
        .iter()
        .chain(calendar)
        .chain(tasks)
        .cloned()
        .collect()
}

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` as midnight UTC.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// [`parse_timestamp`] with a logged fallback to `now`.
pub(crate) fn timestamp_or(s: Option<&str>, now: DateTime<Utc>, field: &str) -> DateTime<Utc> {
    match s {
        Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
            warn!(field, value = raw, "unparseable timestamp, using now");
            now
        }),
        None => now,
    }
}
