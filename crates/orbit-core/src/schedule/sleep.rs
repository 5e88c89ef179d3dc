//! Daily sleep window ("do not schedule" hours).

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A user's configured rest interval, two local times of day.
///
/// When the start hour is greater than the end hour the window wraps past
/// midnight (23:00-07:00). Otherwise it is a same-day window (01:00-05:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSleepWindow", into = "RawSleepWindow")]
pub struct SleepWindow {
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Serialize, Deserialize)]
struct RawSleepWindow {
    start: String,
    end: String,
}

impl TryFrom<RawSleepWindow> for SleepWindow {
    type Error = ValidationError;

    fn try_from(raw: RawSleepWindow) -> Result<Self, Self::Error> {
        Self::parse(&raw.start, &raw.end)
    }
}

impl From<SleepWindow> for RawSleepWindow {
    fn from(window: SleepWindow) -> Self {
        Self {
            start: format_hhmm(window.start),
            end: format_hhmm(window.end),
        }
    }
}

impl SleepWindow {
    /// Parse a window from two "HH:MM" strings.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidTimeOfDay`] for anything that is not
    /// an hour 0-23 and minute 0-59 separated by a colon.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn wraps_midnight(&self) -> bool {
        self.start.hour() > self.end.hour()
    }

    /// Whether a local hour of day (0-23) falls in the window.
    ///
    /// Only whole hours are compared; the minutes of the configured bounds
    /// are ignored. A window whose bounds share an hour never matches.
    pub fn contains_hour(&self, hour: u32) -> bool {
        let start_h = self.start.hour();
        let end_h = self.end.hour();
        if start_h > end_h {
            hour >= start_h || hour < end_h
        } else {
            hour >= start_h && hour < end_h
        }
    }
}

impl Default for SleepWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl fmt::Display for SleepWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_hhmm(self.start), format_hhmm(self.end))
    }
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidTimeOfDay(s.to_string());

    let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
    if h.is_empty() || m.len() != 2 {
        return Err(invalid());
    }
    let hour: u32 = h.parse().map_err(|_| invalid())?;
    let minute: u32 = m.parse().map_err(|_| invalid())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn format_hhmm(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}
