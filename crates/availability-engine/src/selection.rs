//! Pick the records that apply to one calendar date and process them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::processor::process_day;
use crate::record::EventRecord;

/// The processed blocks of a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub blocks: Vec<EventRecord>,
}

impl DaySchedule {
    /// No blocks at all: the calendar shows the day as free.
    pub fn is_free(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Parse a `YYYY-MM-DD` calendar date, the format the feed uses for `Date`.
///
/// # Errors
/// Returns `ScheduleError::InvalidDate` for anything else.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(date.to_string()))
}

/// Records that apply to `date`.
///
/// A record carrying a `date` matches on that date only and is never matched
/// by weekday. An unreadable `date` matches nothing. A record without one matches when its `day_of_week` is the
/// target's weekday. Records with neither are skipped.
pub fn events_for_date(events: &[EventRecord], date: NaiveDate) -> Vec<EventRecord> {
    let weekday = date.weekday();

    events
        .iter()
        .filter(|event| match &event.date {
            Some(pinned) => pinned.matches(date),
            None => event.day_of_week == Some(weekday),
        })
        .cloned()
        .collect()
}

/// Select the records for `date` and run them through [`process_day`].
pub fn schedule_for_date(events: &[EventRecord], date: NaiveDate) -> DaySchedule {
    let selected = events_for_date(events, date);
    let blocks = process_day(&selected);

    debug!(
        %date,
        selected = selected.len(),
        blocks = blocks.len(),
        "processed day"
    );

    DaySchedule { date, blocks }
}
