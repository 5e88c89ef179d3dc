//! Agenda assembly.
//!
//! Merges items from every source into one chronological list and fills
//! idle gaps between consecutive items with synthesized breaks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::item::ScheduleItem;

/// Smallest gap (minutes) that earns a break
pub const BREAK_MIN_GAP_MINUTES: i64 = 15;

/// Smallest gap (minutes) long enough for a meal
pub const MEAL_BREAK_MIN_GAP_MINUTES: i64 = 45;

/// Category of a synthesized break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    Stretch, // 15-44 minutes
    Meal,    // 45+ minutes
}

impl BreakKind {
    /// Categorize a gap by its duration in minutes. `None` when too short.
    pub fn for_gap(minutes: i64) -> Option<Self> {
        if minutes >= MEAL_BREAK_MIN_GAP_MINUTES {
            Some(Self::Meal)
        } else if minutes >= BREAK_MIN_GAP_MINUTES {
            Some(Self::Stretch)
        } else {
            None
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Stretch => "Breathe & Stretch",
            Self::Meal => "Eat Something",
        }
    }
}

/// Build the display agenda from an unsorted snapshot.
///
/// Items are stable-sorted by start time, so items sharing a start keep
/// their input order. After each item a break is emitted when the gap to
/// the next item is at least [`BREAK_MIN_GAP_MINUTES`]. Overlapping items
/// and items with an inverted range produce no break. No break follows the
/// last item.
pub fn build_agenda(items: &[ScheduleItem]) -> Vec<ScheduleItem> {
    let mut sorted: Vec<&ScheduleItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.start_time);

    let mut agenda = Vec::with_capacity(sorted.len() * 2);
    let mut breaks = 0usize;

    for (i, current) in sorted.iter().enumerate() {
        agenda.push((*current).clone());

        let Some(next) = sorted.get(i + 1) else {
            continue;
        };

        let gap = gap_minutes(current, next.start_time);
        if let Some(kind) = BreakKind::for_gap(gap) {
            agenda.push(ScheduleItem::new_break(
                current.owner_id.clone(),
                kind.title(),
                current.end_time,
                next.start_time,
            ));
            breaks += 1;
        }
    }

    debug!(items = items.len(), breaks, "built agenda");
    agenda
}

/// Merge already-mapped sources and build the agenda.
///
/// Local items come first, then calendar events, then tasks; with the
/// stable sort this is also the order of items sharing a start time.
pub fn build_agenda_from_sources(
    local: &[ScheduleItem],
    calendar: &[ScheduleItem],
    tasks: &[ScheduleItem],
) -> Vec<ScheduleItem> {
    let merged = crate::providers::merge_sources(local, calendar, tasks);
    build_agenda(&merged)
}

/// Minutes between `item`'s end and `next_start`; zero for inverted items.
fn gap_minutes(item: &ScheduleItem, next_start: DateTime<Utc>) -> i64 {
    if item.end_time < item.start_time {
        return 0;
    }
    (next_start - item.end_time).num_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::item::{ItemId, ItemKind};
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    fn item(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleItem {
        ScheduleItem::try_new(ItemId::local(id), "u1", id, ItemKind::Event, start, end).unwrap()
    }

    #[test]
    fn test_break_kind_classification() {
        assert_eq!(BreakKind::for_gap(14), None);
        assert_eq!(BreakKind::for_gap(15), Some(BreakKind::Stretch));
        assert_eq!(BreakKind::for_gap(44), Some(BreakKind::Stretch));
        assert_eq!(BreakKind::for_gap(45), Some(BreakKind::Meal));
        assert_eq!(BreakKind::for_gap(240), Some(BreakKind::Meal));
    }

    #[test]
    fn test_empty_and_single() {
        assert!(build_agenda(&[]).is_empty());

        let only = item("a", at(9, 0), at(10, 0));
        assert_eq!(build_agenda(std::slice::from_ref(&only)), vec![only]);
    }

    #[test]
    fn test_gap_thresholds() {
        let a = item("a", at(9, 0), at(10, 0));

        let out = build_agenda(&[a.clone(), item("b", at(10, 14), at(11, 0))]);
        assert_eq!(out.len(), 2);

        let out = build_agenda(&[a.clone(), item("b", at(10, 15), at(11, 0))]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].title, "Breathe & Stretch");
        assert_eq!(out[1].start_time, at(10, 0));
        assert_eq!(out[1].end_time, at(10, 15));
        assert_eq!(out[1].owner_id, "u1");
        assert!(out[1].external_ref.is_none());

        let out = build_agenda(&[a, item("b", at(10, 45), at(11, 0))]);
        assert_eq!(out[1].title, "Eat Something");
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let late = item("late", at(15, 0), at(16, 0));
        let early = item("early", at(9, 0), at(10, 0));
        let out = build_agenda(&[late.clone(), early.clone()]);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0], early);
        assert_eq!(out[1].kind, ItemKind::Break);
        assert_eq!(out[2], late);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let first = item("first", at(9, 0), at(9, 30));
        let second = item("second", at(9, 0), at(10, 0));
        let out = build_agenda(&[first.clone(), second.clone()]);
        assert_eq!(out, vec![first, second]);
    }

    #[test]
    fn test_overlap_produces_no_break() {
        let out = build_agenda(&[
            item("a", at(9, 0), at(11, 0)),
            item("b", at(10, 0), at(12, 0)),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_inverted_item_treated_as_zero_gap() {
        let mut bad = item("bad", at(9, 0), at(9, 0));
        bad.end_time = at(8, 0);
        let out = build_agenda(&[bad, item("b", at(12, 0), at(13, 0))]);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| !i.is_break()));
    }

    #[test]
    fn test_break_ids_are_fresh() {
        let items = [
            item("a", at(9, 0), at(10, 0)),
            item("b", at(11, 0), at(12, 0)),
            item("c", at(13, 0), at(14, 0)),
        ];
        let out = build_agenda(&items);
        let breaks: Vec<_> = out.iter().filter(|i| i.is_break()).collect();
        assert_eq!(breaks.len(), 2);
        assert_ne!(breaks[0].id, breaks[1].id);
        assert!(breaks.iter().all(|b| b.id.is_break()));
    }

    #[test]
    fn test_gap_uses_whole_minutes() {
        let a = item("a", at(9, 0), at(10, 0));
        let b = item(
            "b",
            at(10, 14) + Duration::seconds(59),
            at(11, 0),
        );
        assert_eq!(build_agenda(&[a, b]).len(), 2);
    }
}
