//! Google Tasks v1 items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp_or;
use crate::schedule::{ExternalRef, ItemId, ItemKind, ItemStatus, ScheduleItem};

/// Google Task representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTask {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: String, // "needsAction" | "completed"
    #[serde(default)]
    pub due: Option<String>,
}

/// Map a task as a zero-length item at its due time (or `now` when undated).
pub fn from_google_task(task: &GoogleTask, owner_id: &str, now: DateTime<Utc>) -> ScheduleItem {
    let due = timestamp_or(task.due.as_deref(), now, "due");
    let status = if task.status == "completed" {
        ItemStatus::Completed
    } else {
        ItemStatus::Pending
    };

    ScheduleItem {
        id: ItemId::Provider(task.id.clone()),
        owner_id: owner_id.to_string(),
        title: task.title.clone(),
        description: task.notes.clone(),
        start_time: due,
        end_time: due,
        status,
        kind: ItemKind::Task,
        external_ref: Some(ExternalRef::Task(task.id.clone())),
    }
}
