//! # Orbit Core Library
//!
//! This library provides the scheduling logic behind Orbit, a personal
//! agenda that merges local items with Google Calendar events and Google
//! Tasks. Fetching, authentication and persistence live in the host
//! application; this crate works on in-memory snapshots only.
//!
//! ## Architecture
//!
//! - **Schedule**: agenda assembly with synthesized breaks, and the
//!   next-free-slot search around busy items and the sleep window
//! - **Providers**: pure adapters from local rows, calendar events and tasks
//!   into the shared [`ScheduleItem`] shape
//! - **Capture**: date detection in page text and `.ics` export
//! - **Config**: TOML-based user configuration
//!
//! ## Key Components
//!
//! - [`build_agenda`]: chronological agenda with breaks
//! - [`find_next_slot`]: earliest free slot
//! - [`SleepWindow`]: daily "do not schedule" hours
//! - [`Config`]: application configuration management

pub mod capture;
pub mod config;
pub mod error;
pub mod providers;
pub mod schedule;

pub use capture::{build_ics, detect_dates_in_text, CapturedDate};
pub use config::Config;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use providers::{
    from_calendar_event, from_google_task, from_local_row, merge_sources, CalendarEvent,
    GoogleTask, LocalRow,
};
pub use schedule::{
    build_agenda, build_agenda_from_sources, find_next_slot, find_next_slot_at, BreakKind,
    ExternalRef, ItemId, ItemKind, ItemStatus, ScheduleItem, SleepWindow, Slot,
};
