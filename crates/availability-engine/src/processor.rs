//! Turn one day's raw records into display blocks.
//!
//! Regular events are split around overlapping special events, the pieces are
//! sorted by start time, then time-adjacent blocks with the same status and
//! event type are consolidated. Intervals are half-open `[start, end)`.
//!
//! Specials that overlap each other are not de-overlapped.

use crate::record::EventRecord;

/// Process the records that apply to a single day.
///
/// The result is sorted by start time. Given non-overlapping regular events
/// and non-overlapping specials, the result is also non-overlapping and has no
/// touching pair sharing status and event type.
pub fn process_day(events: &[EventRecord]) -> Vec<EventRecord> {
    let (specials, regulars): (Vec<&EventRecord>, Vec<&EventRecord>) =
        events.iter().partition(|e| e.is_special());

    let mut blocks: Vec<EventRecord> = regulars
        .into_iter()
        .flat_map(|regular| split_around_specials(regular, &specials))
        .collect();

    blocks.extend(specials.into_iter().cloned());

    // Stable: ties keep regular fragments ahead of specials.
    blocks.sort_by_key(EventRecord::start_minutes);

    consolidate_blocks(blocks)
}

/// Split one regular event around the specials that overlap it.
///
/// Overlap is strict (`special.start < regular.end && special.end > regular.start`),
/// so a special that merely touches the regular event leaves it whole. With no
/// overlapping special the event is returned unchanged, original time strings
/// included. A regular event fully covered by specials yields nothing.
pub fn split_around_specials(regular: &EventRecord, specials: &[&EventRecord]) -> Vec<EventRecord> {
    let regular_start = regular.start_minutes();
    let regular_end = regular.end_minutes();

    let mut overlapping: Vec<(u32, u32)> = specials
        .iter()
        .map(|s| (s.start_minutes(), s.end_minutes()))
        .filter(|&(start, end)| start < regular_end && end > regular_start)
        .collect();

    if overlapping.is_empty() {
        return vec![regular.clone()];
    }

    overlapping.sort_by_key(|&(start, _)| start);

    let mut fragments = Vec::new();
    let mut cursor = regular_start;

    for (special_start, special_end) in overlapping {
        if cursor < special_start {
            fragments.push(regular.fragment(cursor, special_start));
        }
        cursor = cursor.max(special_end);
    }

    // Trailing piece after the last special.
    if cursor < regular_end {
        fragments.push(regular.fragment(cursor, regular_end));
    }

    fragments
}

/// Merge touching blocks that share status and event type.
///
/// Expects blocks sorted by start time. A block merges into the running one
/// when its start equals the running end exactly; the running block then takes
/// the merged block's end time string. Running this on its own output changes
/// nothing.
pub fn consolidate_blocks(blocks: Vec<EventRecord>) -> Vec<EventRecord> {
    let mut blocks = blocks.into_iter();
    let Some(mut current) = blocks.next() else {
        return Vec::new();
    };

    let mut consolidated = Vec::new();
    for next in blocks {
        let mergeable = current.status == next.status
            && current.event_type == next.event_type
            && current.end_minutes() == next.start_minutes();

        if mergeable {
            current.end_time = next.end_time;
        } else {
            consolidated.push(std::mem::replace(&mut current, next));
        }
    }
    consolidated.push(current);

    consolidated
}
