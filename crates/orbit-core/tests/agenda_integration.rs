//! Integration tests for agenda assembly across item sources.

use chrono::{DateTime, Duration, TimeZone, Utc};
use orbit_core::providers::{CalendarEvent, GoogleTask, LocalRow};
use orbit_core::{
    build_agenda, build_agenda_from_sources, from_calendar_event, from_google_task,
    from_local_row, ItemId, ItemKind, ScheduleItem,
};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()
}

fn item(id: usize, start_min: i64, len_min: i64) -> ScheduleItem {
    let start = base() + Duration::minutes(start_min);
    ScheduleItem::try_new(
        ItemId::local(id.to_string()),
        "u1",
        format!("item {id}"),
        ItemKind::Event,
        start,
        start + Duration::minutes(len_min),
    )
    .unwrap()
}

#[test]
fn test_day_from_three_sources() {
    let now = base();

    let local: Vec<LocalRow> = serde_json::from_value(serde_json::json!([
        {
            "id": 1, "user_id": "u1", "title": "Deep work",
            "start_time": "2025-03-10T09:00:00Z", "end_time": "2025-03-10T11:00:00Z"
        },
        {
            "id": 2, "user_id": "u1", "title": "Gym",
            "start_time": "2025-03-10T17:00:00Z", "end_time": "2025-03-10T18:00:00Z",
            "type": "task"
        }
    ]))
    .unwrap();
    let calendar: Vec<CalendarEvent> = serde_json::from_value(serde_json::json!([
        {
            "id": "evt1", "summary": "Lunch with Sam",
            "start": { "dateTime": "2025-03-10T12:00:00Z" },
            "end": { "dateTime": "2025-03-10T13:00:00Z" }
        },
        {
            "id": "evt2", "summary": "Review",
            "start": { "dateTime": "2025-03-10T13:20:00Z" },
            "end": { "dateTime": "2025-03-10T14:00:00Z" }
        }
    ]))
    .unwrap();
    let tasks: Vec<GoogleTask> = serde_json::from_value(serde_json::json!([
        { "id": "t1", "title": "Send invoice", "status": "needsAction",
          "due": "2025-03-10T14:05:00Z" }
    ]))
    .unwrap();

    let local: Vec<_> = local.iter().map(|r| from_local_row(r, now)).collect();
    let calendar: Vec<_> = calendar
        .iter()
        .map(|e| from_calendar_event(e, "u1", now))
        .collect();
    let tasks: Vec<_> = tasks.iter().map(|t| from_google_task(t, "u1", now)).collect();

    let agenda = build_agenda_from_sources(&local, &calendar, &tasks);
    let titles: Vec<&str> = agenda.iter().map(|i| i.title.as_str()).collect();

    assert_eq!(
        titles,
        vec![
            "Deep work",
            "Eat Something",     // 11:00-12:00
            "📅 Lunch with Sam",
            "Breathe & Stretch", // 13:00-13:20
            "📅 Review",
            "Send invoice",      // 14:05, gap of 5 minutes
            "Eat Something",     // 14:05-17:00
            "Gym",
        ]
    );
    assert!(agenda
        .iter()
        .filter(|i| i.is_break())
        .all(|i| i.external_ref.is_none() && i.owner_id == "u1"));
}

#[test]
fn test_rebuilding_from_filtered_output_is_stable() {
    let items = vec![item(1, 600, 30), item(2, 60, 30), item(3, 200, 10)];
    let first = build_agenda(&items);
    let real: Vec<ScheduleItem> = first.iter().filter(|i| !i.is_break()).cloned().collect();
    let second = build_agenda(&real);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.title, b.title);
        assert_eq!(a.start_time, b.start_time);
        assert_eq!(a.end_time, b.end_time);
    }
}

proptest! {
    #[test]
    fn prop_breaks_removed_yield_sorted_input(
        specs in prop::collection::vec((0i64..2000, 0i64..180), 0..20)
    ) {
        let items: Vec<ScheduleItem> = specs
            .iter()
            .enumerate()
            .map(|(i, (start, len))| item(i, *start, *len))
            .collect();

        let agenda = build_agenda(&items);
        prop_assert!(agenda.len() >= items.len());

        let mut expected = items.clone();
        expected.sort_by_key(|i| i.start_time);
        let real: Vec<ScheduleItem> = agenda.iter().filter(|i| !i.is_break()).cloned().collect();
        prop_assert_eq!(real, expected);

        for pair in agenda.windows(2) {
            prop_assert!(pair[0].start_time <= pair[1].start_time);
        }
    }

    #[test]
    fn prop_breaks_fill_gaps_exactly(
        specs in prop::collection::vec((0i64..2000, 0i64..180), 2..20)
    ) {
        let items: Vec<ScheduleItem> = specs
            .iter()
            .enumerate()
            .map(|(i, (start, len))| item(i, *start, *len))
            .collect();

        let agenda = build_agenda(&items);
        for (i, entry) in agenda.iter().enumerate() {
            if !entry.is_break() {
                continue;
            }
            let prev = &agenda[i - 1];
            let next = &agenda[i + 1];
            prop_assert_eq!(entry.start_time, prev.end_time);
            prop_assert_eq!(entry.end_time, next.start_time);
            prop_assert!(entry.duration_minutes() >= 15);
        }
    }
}
