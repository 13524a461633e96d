//! Task deadline value.
//!
//! # Responsibility
//! - Hold the (calendar date, time-of-day) pair attached to a task.
//! - Combine both parts into one orderable instant for sorting.
//!
//! # Invariants
//! - Date and time are always present together; an absent deadline is
//!   modelled as `Option::<Deadline>::None` on the task.
//! - Ordering is chronological, never lexical.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Time-of-day pre-filled by new-task forms (09:00).
pub fn default_deadline_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time of day")
}

/// Calendar date plus time-of-day by which a task should be done.
///
/// Serialized as `{"date": "YYYY-MM-DD", "time": "HH:MM"}`; seconds are
/// appended only when the time carries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deadline {
    pub date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub time: NaiveTime,
}

impl Deadline {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Deadline on `date` at the default form time (09:00).
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date, default_deadline_time())
    }

    /// Single orderable instant used by deadline comparisons.
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Returns whether the deadline lies strictly before `now`.
    pub fn is_overdue_at(&self, now: NaiveDateTime) -> bool {
        self.instant() < now
    }

    /// Card label, `DD/MM/YYYY HH:MM`.
    pub fn display(&self) -> String {
        format!(
            "{} {}",
            self.date.format("%d/%m/%Y"),
            self.time.format(hour_minute::FORMAT)
        )
    }
}

impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Deadline {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.instant().cmp(&other.instant())
    }
}

/// `HH:MM` wire format for time-of-day.
///
/// Times with seconds are written as `HH:MM:SS[.fff]` so a stored value
/// always reads back unchanged.
mod hour_minute {
    use chrono::{NaiveTime, Timelike};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";
    const FORMAT_WITH_SECONDS: &str = "%H:%M:%S%.f";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let format = if time.second() == 0 && time.nanosecond() == 0 {
            FORMAT
        } else {
            FORMAT_WITH_SECONDS
        };
        serializer.collect_str(&time.format(format))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        NaiveTime::parse_from_str(trimmed, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(trimmed, FORMAT_WITH_SECONDS))
            .map_err(|err| de::Error::custom(format!("invalid time of day `{raw}`: {err}")))
    }
}
