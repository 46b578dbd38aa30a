//! Tests for loading the JSON snapshot.

use availability_engine::record::{EventType, RecordDate, Status};
use availability_engine::selection::events_for_date;
use availability_engine::snapshot::{load_snapshot, Snapshot};
use availability_engine::ScheduleError;
use chrono::{NaiveDate, Weekday};

const SNAPSHOT: &str = r#"[
  {
    "id": "rec001",
    "createdTime": "2026-01-10T12:00:00.000Z",
    "fields": {
      "Name": "Weekday hours",
      "Status": "Available",
      "Event Type": "Regular",
      "Start Time": "9:00",
      "End Time": "17:00",
      "Day of Week": "Monday"
    }
  },
  {
    "id": "rec002",
    "createdTime": "2026-01-11T12:00:00.000Z",
    "fields": {
      "Status": "Busy",
      "Event Type": "Special",
      "Start Time": "12:00",
      "End Time": "13:00",
      "Date": "2026-03-16"
    }
  },
  {
    "id": "rec003",
    "createdTime": "2026-01-12T12:00:00.000Z",
    "fields": {}
  }
]"#;

#[test]
fn loads_fields_of_every_record() {
    let events = load_snapshot(SNAPSHOT).unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].day_of_week, Some(Weekday::Mon));
    assert_eq!(events[0].status, Status::Available);
    assert_eq!(events[1].event_type, EventType::Special);
    assert_eq!(
        events[1].date.as_ref().and_then(RecordDate::day),
        NaiveDate::from_ymd_opt(2026, 3, 16)
    );
}

#[test]
fn empty_fields_take_defaults() {
    let events = load_snapshot(SNAPSHOT).unwrap();

    assert_eq!(events[2].status, Status::Busy);
    assert_eq!(events[2].event_type, EventType::Regular);
    assert_eq!(events[2].start_time, "");
}

#[test]
fn snapshot_keeps_record_metadata() {
    let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.records[0].id, "rec001");
    assert_eq!(snapshot.records[1].created_time, "2026-01-11T12:00:00.000Z");
}

#[test]
fn empty_array_is_an_empty_snapshot() {
    let snapshot = Snapshot::from_json("[]").unwrap();
    assert!(snapshot.is_empty());
}

#[test]
fn non_array_is_rejected() {
    let err = load_snapshot(r#"{"records": []}"#).unwrap_err();
    assert!(matches!(err, ScheduleError::Snapshot(_)));
}

#[test]
fn unreadable_date_loads_but_never_matches() {
    let json = r#"[
      {"id": "rec1", "createdTime": "", "fields": {
        "Status": "Available", "Event Type": "Regular",
        "Start Time": "9:00", "End Time": "17:00", "Day of Week": "Monday"}},
      {"id": "rec2", "createdTime": "", "fields": {
        "Status": "Busy", "Event Type": "Special",
        "Start Time": "12:00", "End Time": "13:00",
        "Date": "2026-03-16T00:00:00.000Z", "Day of Week": "Monday"}}
    ]"#;

    let events = load_snapshot(json).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1].date,
        Some(RecordDate::Unreadable("2026-03-16T00:00:00.000Z".to_string()))
    );

    // 2026-03-16 is a Monday: only the recurring row applies.
    let monday = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let selected = events_for_date(&events, monday);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].status, Status::Available);
}
