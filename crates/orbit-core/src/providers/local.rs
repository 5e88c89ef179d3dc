//! Local-store rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::timestamp_or;
use crate::schedule::{ExternalRef, ItemId, ItemKind, ItemStatus, ScheduleItem};

/// Row ids are numeric in the hosted store but arrive as strings from some
/// clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A row of the `events` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalRow {
    pub id: RowId,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: ItemStatus,
    /// `event` or `task`; older rows have no type
    #[serde(rename = "type", default)]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub google_calendar_id: Option<String>,
}

/// Map a local row. Unparseable timestamps become `now`, and a stored
/// `break` type is read as `event` since breaks are never persisted.
pub fn from_local_row(row: &LocalRow, now: DateTime<Utc>) -> ScheduleItem {
    let kind = match row.kind {
        Some(ItemKind::Task) => ItemKind::Task,
        _ => ItemKind::Event,
    };

    ScheduleItem {
        id: ItemId::Local(row.id.to_string()),
        owner_id: row.user_id.clone(),
        title: row.title.clone(),
        description: row.description.clone(),
        start_time: timestamp_or(Some(&row.start_time), now, "start_time"),
        end_time: timestamp_or(Some(&row.end_time), now, "end_time"),
        status: row.status,
        kind,
        external_ref: row
            .google_calendar_id
            .clone()
            .map(ExternalRef::CalendarEvent),
    }
}
