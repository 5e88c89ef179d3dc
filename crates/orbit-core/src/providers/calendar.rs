//! Google Calendar v3 events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp_or;
use crate::schedule::{ExternalRef, ItemId, ItemKind, ItemStatus, ScheduleItem};

/// Prefix marking calendar-sourced items in the agenda
pub const CALENDAR_TITLE_PREFIX: &str = "📅 ";

/// `start`/`end` of an event: timed events carry `dateTime`, all-day
/// events carry `date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl EventTime {
    fn raw(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

/// Google Calendar event representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
    #[serde(default)]
    pub html_link: Option<String>,
}

/// Map a calendar event for `owner_id`.
pub fn from_calendar_event(
    event: &CalendarEvent,
    owner_id: &str,
    now: DateTime<Utc>,
) -> ScheduleItem {
    let summary = event.summary.as_deref().unwrap_or("(no title)");

    ScheduleItem {
        id: ItemId::Provider(event.id.clone()),
        owner_id: owner_id.to_string(),
        title: format!("{CALENDAR_TITLE_PREFIX}{summary}"),
        description: event.description.clone(),
        start_time: timestamp_or(event.start.raw(), now, "start"),
        end_time: timestamp_or(event.end.raw(), now, "end"),
        status: ItemStatus::Pending,
        kind: ItemKind::Event,
        external_ref: Some(ExternalRef::CalendarEvent(event.id.clone())),
    }
}
