pub mod agenda;
pub mod capture;
pub mod config;
pub mod slot;

use chrono::{DateTime, Utc};
use orbit_core::providers::{CalendarEvent, GoogleTask, LocalRow};
use orbit_core::{
    from_calendar_event, from_google_task, from_local_row, Config, ItemStatus, Result,
    ScheduleItem,
};
use serde::Deserialize;
use std::path::Path;

/// Items as fetched from each source, one JSON document.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    /// Owner for provider items; falls back to `agenda.owner_id`
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub local: Vec<LocalRow>,
    #[serde(default)]
    pub calendar: Vec<CalendarEvent>,
    #[serde(default)]
    pub tasks: Vec<GoogleTask>,
}

/// Mapped sources in merge order.
pub struct MappedSnapshot {
    pub local: Vec<ScheduleItem>,
    pub calendar: Vec<ScheduleItem>,
    pub tasks: Vec<ScheduleItem>,
}

impl MappedSnapshot {
    /// Drop items the user skipped; they neither show nor block time.
    pub fn without_skipped(mut self) -> Self {
        for items in [&mut self.local, &mut self.calendar, &mut self.tasks] {
            items.retain(|item| item.status != ItemStatus::Skipped);
        }
        self
    }
}

impl Snapshot {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn map(&self, default_owner: &str, now: DateTime<Utc>) -> MappedSnapshot {
        let owner = self.owner_id.as_deref().unwrap_or(default_owner);
        MappedSnapshot {
            local: self.local.iter().map(|r| from_local_row(r, now)).collect(),
            calendar: self
                .calendar
                .iter()
                .map(|e| from_calendar_event(e, owner, now))
                .collect(),
            tasks: self
                .tasks
                .iter()
                .map(|t| from_google_task(t, owner, now))
                .collect(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    Ok(match path {
        Some(p) => Config::load_from(p)?,
        None => Config::load()?,
    })
}

pub fn parse_now(raw: Option<&str>) -> Result<Option<DateTime<chrono::FixedOffset>>, String> {
    raw.map(|s| {
        DateTime::parse_from_rfc3339(s).map_err(|e| format!("invalid --now '{s}': {e}"))
    })
    .transpose()
}
