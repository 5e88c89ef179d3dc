//! Schedule assembly and slot finding.
//!
//! This module provides:
//! - The shared agenda item model
//! - Agenda building with synthesized breaks between items
//! - Next-free-slot search around busy items and the sleep window

mod agenda;
mod item;
mod sleep;
mod slot;

pub use agenda::{
    build_agenda, build_agenda_from_sources, BreakKind, BREAK_MIN_GAP_MINUTES,
    MEAL_BREAK_MIN_GAP_MINUTES,
};
pub use item::{ExternalRef, ItemId, ItemKind, ItemStatus, ScheduleItem, Slot};
pub use sleep::SleepWindow;
pub use slot::{
    find_next_slot, find_next_slot_at, SEARCH_BUFFER_MINUTES, SEARCH_HORIZON_HOURS, STEP_MINUTES,
};
