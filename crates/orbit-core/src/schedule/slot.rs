//! Next-free-slot search.
//!
//! Steps a candidate start forward in fixed increments from shortly after
//! "now" until it finds an interval that overlaps no busy item and does not
//! start inside the sleep window.

use chrono::{DateTime, Duration, Local, TimeZone, Timelike, Utc};
use tracing::{debug, warn};

use super::item::{ScheduleItem, Slot};
use super::sleep::SleepWindow;

/// Minimum lead time before the earliest candidate
pub const SEARCH_BUFFER_MINUTES: i64 = 10;

/// Candidate step
pub const STEP_MINUTES: i64 = 15;

/// Search gives up after this long past the first candidate
pub const SEARCH_HORIZON_HOURS: i64 = 48;

/// Find the next free slot starting from the current local time.
///
/// See [`find_next_slot_at`].
pub fn find_next_slot(
    duration_minutes: u32,
    busy_items: &[ScheduleItem],
    sleep_window: &SleepWindow,
) -> Slot {
    find_next_slot_at(Local::now(), duration_minutes, busy_items, sleep_window)
}

/// Find the earliest slot of `duration_minutes` at or after
/// `now + SEARCH_BUFFER_MINUTES`.
///
/// Hours are read in `now`'s timezone for the sleep check, and only the
/// candidate's starting hour is tested. If no candidate within
/// [`SEARCH_HORIZON_HOURS`] is free, the first candidate is returned anyway.
pub fn find_next_slot_at<Tz: TimeZone>(
    now: DateTime<Tz>,
    duration_minutes: u32,
    busy_items: &[ScheduleItem],
    sleep_window: &SleepWindow,
) -> Slot {
    let tz = now.timezone();
    let duration = Duration::minutes(i64::from(duration_minutes));
    let search_start = now.with_timezone(&Utc) + Duration::minutes(SEARCH_BUFFER_MINUTES);
    let horizon = search_start + Duration::hours(SEARCH_HORIZON_HOURS);

    let mut upcoming: Vec<&ScheduleItem> = busy_items
        .iter()
        .filter(|item| item.end_time > search_start)
        .collect();
    upcoming.sort_by_key(|item| item.start_time);

    let mut candidate = search_start;
    while candidate < horizon {
        let candidate_end = candidate + duration;

        let collides = upcoming
            .iter()
            .any(|item| item.overlaps_range(candidate, candidate_end));
        let sleeping = sleep_window.contains_hour(local_hour(candidate, &tz));

        if !collides && !sleeping {
            debug!(
                start = %candidate,
                end = %candidate_end,
                busy = upcoming.len(),
                "found free slot"
            );
            return Slot {
                start: candidate,
                end: candidate_end,
            };
        }

        candidate += Duration::minutes(STEP_MINUTES);
    }

    warn!(
        duration_minutes,
        busy = upcoming.len(),
        "no free slot within {SEARCH_HORIZON_HOURS}h, falling back to first candidate"
    );
    Slot {
        start: search_start,
        end: search_start + duration,
    }
}

fn local_hour<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> u32 {
    instant.with_timezone(tz).hour()
}
