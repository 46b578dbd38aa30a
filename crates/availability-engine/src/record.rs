//! Availability records as they appear in the snapshot's `fields` object.
//!
//! Field names are the fixed feed strings (`"Start Time"`, `"Event Type"`, ...).
//! The processor's output blocks share this shape.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::selection::parse_date;
use crate::time::{minutes_to_time, parse_time, time_to_minutes};

/// Display category of a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// Also used when the feed leaves `Status` empty.
    #[default]
    Busy,
    Available,
    /// Any other status string, kept verbatim.
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Busy => "Busy",
            Status::Available => "Available",
            Status::Other(s) => s,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Busy" | "" => Status::Busy,
            "Available" => Status::Available,
            _ => Status::Other(s),
        }
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Status::from(s.to_string())
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        match s {
            Status::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a block. Special events carve into overlapping regular ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// Any value other than `"Special"`, including a missing field.
    #[default]
    Regular,
    Special,
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        if s == "Special" {
            EventType::Special
        } else {
            EventType::Regular
        }
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        match t {
            EventType::Regular => "Regular".to_string(),
            EventType::Special => "Special".to_string(),
        }
    }
}

/// The `Date` field of a record.
///
/// A value that is not a `YYYY-MM-DD` date is kept verbatim as `Unreadable`.
/// It still pins the record, so the record matches no date and no weekday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordDate {
    Day(NaiveDate),
    Unreadable(String),
}

impl RecordDate {
    pub fn matches(&self, date: NaiveDate) -> bool {
        matches!(self, RecordDate::Day(day) if *day == date)
    }

    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            RecordDate::Day(day) => Some(*day),
            RecordDate::Unreadable(_) => None,
        }
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(date: NaiveDate) -> Self {
        RecordDate::Day(date)
    }
}

impl From<String> for RecordDate {
    fn from(s: String) -> Self {
        match parse_date(&s) {
            Ok(day) => RecordDate::Day(day),
            Err(_) => {
                tracing::debug!(date = %s, "unreadable record date");
                RecordDate::Unreadable(s)
            }
        }
    }
}

impl From<RecordDate> for String {
    fn from(d: RecordDate) -> Self {
        match d {
            RecordDate::Day(day) => day.format("%Y-%m-%d").to_string(),
            RecordDate::Unreadable(s) => s,
        }
    }
}

/// One availability record, or one processed display block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "Event Type", default)]
    pub event_type: EventType,
    /// `H:MM` or `HH:MM`. Empty when the feed omits it.
    #[serde(rename = "Start Time", default)]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: String,
    /// When set, the record applies to this date only.
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<RecordDate>,
    /// Consulted only when `date` is absent: the record recurs every such weekday.
    #[serde(
        rename = "Day of Week",
        default,
        with = "weekday_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub day_of_week: Option<Weekday>,
}

impl EventRecord {
    pub fn new(
        status: impl Into<Status>,
        event_type: EventType,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            event_type,
            start_time: start_time.into(),
            end_time: end_time.into(),
            date: None,
            day_of_week: None,
        }
    }

    /// Pin the record to one calendar date.
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(RecordDate::Day(date));
        self
    }

    /// Make the record recur on a weekday.
    pub fn on_weekday(mut self, weekday: Weekday) -> Self {
        self.day_of_week = Some(weekday);
        self
    }

    pub fn is_special(&self) -> bool {
        self.event_type == EventType::Special
    }

    /// Start in minutes since midnight (lenient, see [`time_to_minutes`]).
    pub fn start_minutes(&self) -> u32 {
        time_to_minutes(&self.start_time)
    }

    /// End in minutes since midnight (lenient, see [`time_to_minutes`]).
    pub fn end_minutes(&self) -> u32 {
        time_to_minutes(&self.end_time)
    }

    /// A copy of this record bounded to `[start, end)`, times given in minutes.
    pub(crate) fn fragment(&self, start: u32, end: u32) -> Self {
        Self {
            start_time: minutes_to_time(start),
            end_time: minutes_to_time(end),
            ..self.clone()
        }
    }

    /// Strictly check both time strings and the date.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidTime` for the first malformed time, or
    /// `ScheduleError::InvalidDate` for an unreadable `Date`.
    pub fn validate(&self) -> Result<()> {
        parse_time(&self.start_time)?;
        parse_time(&self.end_time)?;
        if let Some(RecordDate::Unreadable(raw)) = &self.date {
            return Err(ScheduleError::InvalidDate(raw.clone()));
        }
        Ok(())
    }
}

/// Full English weekday names, as the feed writes them.
pub fn weekday_full_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Serde adapter for `Option<Weekday>` as a full English name.
///
/// Names must match exactly (`"Monday"`, not `"monday"` or `"Mon"`). Anything
/// else reads as `None`, so the record matches no weekday.
mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{weekday_full_name, WEEKDAYS};

    pub fn serialize<S: Serializer>(
        weekday: &Option<Weekday>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match weekday {
            Some(w) => serializer.serialize_str(weekday_full_name(*w)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<Weekday>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|name| {
            let parsed = WEEKDAYS
                .into_iter()
                .find(|w| weekday_full_name(*w) == name);
            if parsed.is_none() {
                tracing::debug!(name = %name, "unrecognised weekday name");
            }
            parsed
        }))
    }
}
