//! # availability-engine
//!
//! Deterministic day-schedule processing for a weekly availability calendar.
//!
//! Records come from a static snapshot of a shared table. Each one is either a
//! regular block (recurring on a weekday, or pinned to a date) or a special
//! block that takes precedence and carves into the regular blocks it overlaps.
//! The engine turns one day's records into sorted, consolidated display blocks.
//!
//! ## Modules
//!
//! - [`processor`] — split regular events around specials, sort, consolidate
//! - [`selection`] — pick the records that apply to a date
//! - [`calendar`] — week view state and pure week rendering
//! - [`display`] — CSS class, status label and 12-hour time label per block
//! - [`record`] — the record type and its feed field names
//! - [`snapshot`] — load the JSON snapshot
//! - [`time`] — `H:MM` parsing and formatting
//! - [`error`] — Error types

pub mod calendar;
pub mod display;
pub mod error;
pub mod processor;
pub mod record;
pub mod selection;
pub mod snapshot;
pub mod time;

pub use calendar::{week_start, CalendarView, WeekDays, WeekSchedule, DEFAULT_WEEKS_TO_SHOW};
pub use display::BlockDisplay;
pub use error::ScheduleError;
pub use processor::{consolidate_blocks, process_day, split_around_specials};
pub use record::{EventRecord, EventType, RecordDate, Status};
pub use selection::{events_for_date, parse_date, schedule_for_date, DaySchedule};
pub use snapshot::{load_snapshot, Snapshot, SnapshotRecord};
pub use time::{format_time_12h, minutes_to_time, parse_time, time_to_minutes};
