//! WASM bindings for availability-engine.
//!
//! Exposes day processing, week rendering and time labels to the site's
//! calendar script via `wasm-bindgen`. All complex types are passed as JSON
//! strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir static/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::{
    BlockDisplay, CalendarView, DaySchedule, EventRecord, WeekSchedule,
};
use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// A processed block plus everything the renderer needs to draw it.
#[derive(Serialize)]
struct BlockDto {
    #[serde(flatten)]
    block: EventRecord,
    css_class: String,
    label: String,
    time_label: String,
}

impl From<EventRecord> for BlockDto {
    fn from(block: EventRecord) -> Self {
        let display = BlockDisplay::for_block(&block);
        Self {
            block,
            css_class: display.css_class,
            label: display.label,
            time_label: display.time_label,
        }
    }
}

#[derive(Serialize)]
struct DayDto {
    date: String,
    free: bool,
    blocks: Vec<BlockDto>,
}

impl From<DaySchedule> for DayDto {
    fn from(day: DaySchedule) -> Self {
        Self {
            date: day.date.to_string(),
            free: day.is_free(),
            blocks: day.blocks.into_iter().map(BlockDto::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct WeekDto {
    heading: String,
    week_index: usize,
    is_current_week: bool,
    can_go_back: bool,
    can_go_forward: bool,
    days: Vec<DayDto>,
}

impl From<WeekSchedule> for WeekDto {
    fn from(week: WeekSchedule) -> Self {
        Self {
            heading: week.heading,
            week_index: week.week_index,
            is_current_week: week.is_current_week,
            can_go_back: week.can_go_back,
            can_go_forward: week.can_go_forward,
            days: week.days.into_iter().map(DayDto::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    availability_engine::parse_date(s).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_snapshot(json: &str) -> Result<Vec<EventRecord>, JsValue> {
    availability_engine::load_snapshot(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Process one day's records into display blocks.
///
/// `events_json` is a JSON array of record `fields` objects already filtered
/// to a single date. Returns a JSON array of blocks, each with the record
/// fields plus `css_class`, `label` and `time_label`.
#[wasm_bindgen(js_name = "processDay")]
pub fn process_day(events_json: &str) -> Result<String, JsValue> {
    let events: Vec<EventRecord> = serde_json::from_str(events_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))?;

    let blocks: Vec<BlockDto> = availability_engine::process_day(&events)
        .into_iter()
        .map(BlockDto::from)
        .collect();

    to_json(&blocks)
}

/// Select and process the records of `date` (`YYYY-MM-DD`) from a snapshot.
///
/// Returns a JSON object `{date, free, blocks}`.
#[wasm_bindgen(js_name = "scheduleForDate")]
pub fn schedule_for_date(snapshot_json: &str, date: &str) -> Result<String, JsValue> {
    let events = parse_snapshot(snapshot_json)?;
    let date = parse_date(date)?;

    to_json(&DayDto::from(availability_engine::schedule_for_date(&events, date)))
}

/// Render one week of the calendar.
///
/// `today` (`YYYY-MM-DD`) anchors week 0. `week_index` must be below the
/// number of weeks shown (five). Returns the heading, navigation flags and
/// seven day schedules as JSON.
#[wasm_bindgen(js_name = "renderWeek")]
pub fn render_week(snapshot_json: &str, today: &str, week_index: usize) -> Result<String, JsValue> {
    let events = parse_snapshot(snapshot_json)?;
    let mut view = CalendarView::new(parse_date(today)?);

    if !view.go_to(week_index) {
        return Err(JsValue::from_str(&format!(
            "Week index {} out of range (0..{})",
            week_index,
            view.weeks_to_show()
        )));
    }

    to_json(&WeekDto::from(view.render_week(&events)))
}

/// Format a 24-hour feed time as a 12-hour label (`"13:30"` -> `"1:30pm"`).
#[wasm_bindgen(js_name = "formatTime")]
pub fn format_time(time: &str) -> String {
    availability_engine::format_time_12h(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {"id": "rec1", "createdTime": "", "fields": {
            "Status": "Available", "Event Type": "Regular",
            "Start Time": "9:00", "End Time": "17:00", "Day of Week": "Monday"}},
        {"id": "rec2", "createdTime": "", "fields": {
            "Status": "Busy", "Event Type": "Special",
            "Start Time": "12:00", "End Time": "13:00", "Date": "2026-03-16"}}
    ]"#;

    #[test]
    fn process_day_adds_display_fields() {
        let events = r#"[
            {"Status": "Busy", "Event Type": "Regular", "Start Time": "9:00", "End Time": "17:00"},
            {"Status": "Busy", "Event Type": "Special", "Start Time": "12:00", "End Time": "13:00"}
        ]"#;

        let json = process_day(events).unwrap();
        let blocks: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(blocks.as_array().unwrap().len(), 3);
        assert_eq!(blocks[0]["Start Time"], "9:00");
        assert_eq!(blocks[0]["css_class"], "event-busy");
        assert_eq!(blocks[1]["label"], "BOOKED");
        assert_eq!(blocks[2]["time_label"], "1:00pm - 5:00pm");
    }

    #[test]
    fn schedule_for_date_reads_snapshot() {
        let json = schedule_for_date(SNAPSHOT, "2026-03-16").unwrap();
        let day: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(day["date"], "2026-03-16");
        assert_eq!(day["free"], false);
        assert_eq!(day["blocks"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn render_week_returns_seven_days() {
        let json = render_week(SNAPSHOT, "2026-03-18", 0).unwrap();
        let week: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(week["heading"], "Week of Mar 15 - Mar 21");
        assert_eq!(week["days"].as_array().unwrap().len(), 7);
        assert_eq!(week["days"][0]["free"], true);
        assert_eq!(week["can_go_back"], false);
    }

    #[test]
    fn format_time_uses_twelve_hour_clock() {
        assert_eq!(format_time("0:30"), "12:30am");
    }
}
