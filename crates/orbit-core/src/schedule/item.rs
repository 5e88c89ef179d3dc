//! Schedule item types shared by the agenda builder and slot finder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::ValidationError;

/// Identity of an agenda entry.
///
/// Each variant is its own id space, so a synthesized break id can never
/// equal a local or provider id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "lowercase")]
pub enum ItemId {
    /// Row id from the local store (numeric ids kept as decimal text)
    Local(String),
    /// Id assigned by a calendar/task provider
    Provider(String),
    /// Synthesized break, recomputed on every agenda build
    Break(Uuid),
}

impl ItemId {
    pub fn local(id: impl Into<String>) -> Self {
        Self::Local(id.into())
    }

    pub fn provider(id: impl Into<String>) -> Self {
        Self::Provider(id.into())
    }

    /// Fresh id for a synthesized break.
    pub fn new_break() -> Self {
        Self::Break(Uuid::new_v4())
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Self::Break(_))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(id) => write!(f, "local:{id}"),
            Self::Provider(id) => write!(f, "provider:{id}"),
            Self::Break(id) => write!(f, "break:{id}"),
        }
    }
}

/// Completion state of an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Completed,
    Skipped,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        }
    }
}

/// Kind of agenda entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Event, // Calendar-style appointment
    Task,  // Todo with a due time
    Break, // Computed gap filler, never persisted
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Task => "task",
            Self::Break => "break",
        }
    }
}

/// Provider-side identity of a mirrored item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", content = "id", rename_all = "snake_case")]
pub enum ExternalRef {
    CalendarEvent(String),
    Task(String),
}

/// A single agenda entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: ItemId,
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub external_ref: Option<ExternalRef>,
}

impl ScheduleItem {
    /// Create a new pending item
    ///
    /// # Errors
    /// Returns an error if `end_time < start_time`. Zero-length items are allowed.
    pub fn try_new(
        id: ItemId,
        owner_id: impl Into<String>,
        title: impl Into<String>,
        kind: ItemKind,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if end_time < start_time {
            return Err(ValidationError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            id,
            owner_id: owner_id.into(),
            title: title.into(),
            description: None,
            start_time,
            end_time,
            status: ItemStatus::Pending,
            kind,
            external_ref: None,
        })
    }

    /// Synthesized break covering `start..end`.
    pub(crate) fn new_break(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::new_break(),
            owner_id: owner_id.into(),
            title: title.into(),
            description: None,
            start_time,
            end_time,
            status: ItemStatus::Pending,
            kind: ItemKind::Break,
            external_ref: None,
        }
    }

    /// Get duration in minutes, clamped to zero for inverted items
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes().max(0)
    }

    /// Half-open overlap test against `start..end`
    pub fn overlaps_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end_time && end > self.start_time
    }

    pub fn is_break(&self) -> bool {
        self.kind == ItemKind::Break
    }

    /// Whether skip/complete/delete may be applied. Breaks are display-only.
    pub fn is_mutable(&self) -> bool {
        !self.is_break()
    }

    /// Attach a provider reference
    ///
    /// # Errors
    /// Returns [`ValidationError::BreakWithExternalRef`] for break items.
    pub fn with_external_ref(mut self, external: ExternalRef) -> Result<Self, ValidationError> {
        if self.is_break() {
            return Err(ValidationError::BreakWithExternalRef);
        }
        self.external_ref = Some(external);
        Ok(self)
    }
}

/// A candidate `(start, end)` interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
