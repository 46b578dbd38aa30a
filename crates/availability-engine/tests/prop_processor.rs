//! Property-based tests for day processing using proptest.
//!
//! Inputs follow the feed's data contract: regular events do not overlap each
//! other and special events do not overlap each other. Regulars and specials
//! may overlap freely.

use availability_engine::processor::{consolidate_blocks, process_day};
use availability_engine::record::{EventRecord, EventType};
use availability_engine::time::{minutes_to_time, time_to_minutes, MINUTES_PER_DAY};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_status() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Busy"), Just("Available")]
}

/// Sorted, pairwise-disjoint `[start, end)` intervals inside one day, with at
/// least `min_gap` minutes between neighbours.
fn arb_disjoint(min_gap: u32) -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((min_gap..=120u32, 1u32..=180), 0..8).prop_map(|pairs| {
        let mut intervals = Vec::new();
        let mut cursor = 0;
        for (gap, len) in pairs {
            let start = cursor + gap;
            let end = start + len;
            if end >= MINUTES_PER_DAY {
                break;
            }
            intervals.push((start, end));
            cursor = end;
        }
        intervals
    })
}

fn arb_events(event_type: EventType, min_gap: u32) -> impl Strategy<Value = Vec<EventRecord>> {
    arb_disjoint(min_gap).prop_flat_map(move |intervals| {
        let n = intervals.len();
        prop::collection::vec(arb_status(), n).prop_map(move |statuses| {
            intervals
                .iter()
                .zip(statuses)
                .map(|(&(start, end), status)| {
                    EventRecord::new(status, event_type, minutes_to_time(start), minutes_to_time(end))
                })
                .collect::<Vec<_>>()
        })
    })
}

/// Regular and special events for one day.
fn arb_day() -> impl Strategy<Value = (Vec<EventRecord>, Vec<EventRecord>)> {
    (arb_events(EventType::Regular, 0), arb_events(EventType::Special, 0))
}

fn mixed(regulars: &[EventRecord], specials: &[EventRecord]) -> Vec<EventRecord> {
    // Specials first, in reverse, so the processor has to sort.
    specials.iter().rev().chain(regulars.iter()).cloned().collect()
}

fn span(block: &EventRecord) -> (u32, u32) {
    (block.start_minutes(), block.end_minutes())
}

fn overlaps(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

fn contains(outer: (u32, u32), inner: (u32, u32)) -> bool {
    outer.0 <= inner.0 && inner.1 <= outer.1
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn output_is_sorted_and_non_overlapping((regulars, specials) in arb_day()) {
        let blocks = process_day(&mixed(&regulars, &specials));

        for pair in blocks.windows(2) {
            let (a, b) = (span(&pair[0]), span(&pair[1]));
            prop_assert!(a.0 <= b.0, "not sorted: {:?} then {:?}", a, b);
            prop_assert!(a.1 <= b.0, "overlap: {:?} and {:?}", a, b);
        }
    }

    #[test]
    fn no_mergeable_neighbours_remain((regulars, specials) in arb_day()) {
        let blocks = process_day(&mixed(&regulars, &specials));

        for pair in blocks.windows(2) {
            let mergeable = pair[0].status == pair[1].status
                && pair[0].event_type == pair[1].event_type
                && pair[0].end_minutes() == pair[1].start_minutes();
            prop_assert!(!mergeable, "left unmerged: {:?}", pair);
        }
    }

    #[test]
    fn consolidation_is_idempotent((regulars, specials) in arb_day()) {
        let once = process_day(&mixed(&regulars, &specials));
        let twice = consolidate_blocks(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_special_survives_intact((regulars, specials) in arb_day()) {
        let blocks = process_day(&mixed(&regulars, &specials));

        for special in &specials {
            let covered = blocks.iter().any(|b| {
                b.event_type == EventType::Special
                    && b.status == special.status
                    && contains(span(b), span(special))
            });
            prop_assert!(covered, "special {:?} missing from output", special);
        }
    }

    #[test]
    fn regular_blocks_never_overlap_specials((regulars, specials) in arb_day()) {
        let blocks = process_day(&mixed(&regulars, &specials));

        for block in blocks.iter().filter(|b| !b.is_special()) {
            for special in &specials {
                prop_assert!(!overlaps(span(block), span(special)));
            }
        }
    }

    #[test]
    fn untouched_regulars_pass_through((regulars, specials) in arb_day()) {
        let blocks = process_day(&mixed(&regulars, &specials));

        for regular in &regulars {
            if specials.iter().any(|s| overlaps(span(s), span(regular))) {
                continue;
            }
            let covered = blocks.iter().any(|b| {
                b.event_type == EventType::Regular
                    && b.status == regular.status
                    && contains(span(b), span(regular))
            });
            prop_assert!(covered, "regular {:?} lost", regular);
        }
    }

    #[test]
    fn specials_alone_come_back_sorted(specials in arb_events(EventType::Special, 1)) {
        let mut input = specials.clone();
        input.reverse();

        let blocks = process_day(&input);

        prop_assert_eq!(blocks, specials);
    }

    #[test]
    fn time_round_trips(hour in 0u32..24, minute in 0u32..60) {
        let time = format!("{hour}:{minute:02}");
        prop_assert_eq!(minutes_to_time(time_to_minutes(&time)), time);
    }

    #[test]
    fn minutes_round_trip(minutes in 0u32..MINUTES_PER_DAY) {
        prop_assert_eq!(time_to_minutes(&minutes_to_time(minutes)), minutes);
    }
}
