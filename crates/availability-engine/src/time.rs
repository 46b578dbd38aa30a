//! Wall-clock time-of-day helpers at minute granularity.
//!
//! Feed times are `H:MM` or `HH:MM` strings. The processor works on minutes
//! since midnight and converts back only for split fragments.

use tracing::debug;

use crate::error::{Result, ScheduleError};

/// Minutes in one day. Valid times fall in `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Convert `"9:00"` or `"09:00"` to minutes since midnight.
///
/// Lenient: an empty, missing or malformed string yields minute 0. Anything
/// after a second `:` is ignored, so `"09:30:00"` reads as 570. Callers that
/// need validation use [`parse_time`] instead.
pub fn time_to_minutes(time: &str) -> u32 {
    match split_hours_minutes(time).and_then(|(h, m)| h.checked_mul(60)?.checked_add(m)) {
        Some(minutes) => minutes,
        None => {
            if !time.is_empty() {
                debug!(time, "unparseable time, defaulting to minute 0");
            }
            0
        }
    }
}

fn split_hours_minutes(time: &str) -> Option<(u32, u32)> {
    let mut parts = time.trim().split(':');
    let hours = parts.next()?.trim().parse::<u32>().ok()?;
    let minutes = parts.next()?.trim().parse::<u32>().ok()?;
    Some((hours, minutes))
}

/// Convert minutes since midnight to `"H:MM"`.
///
/// The hour is not zero-padded: 540 becomes `"9:00"`, 780 becomes `"13:00"`.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Strictly parse an `H:MM` / `HH:MM` time into minutes since midnight.
///
/// # Errors
/// Returns `ScheduleError::InvalidTime` unless the input is one or two hour
/// digits in `[0, 24)`, a colon, and exactly two minute digits in `[0, 60)`.
pub fn parse_time(time: &str) -> Result<u32> {
    let invalid = || ScheduleError::InvalidTime(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours >= 24 || minutes >= 60 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Format a 24-hour feed time as a 12-hour label, e.g. `"13:30"` -> `"1:30pm"`.
///
/// Hour 0 shows as 12am and hour 12 as 12pm. The minute text is kept exactly
/// as written. An empty input gives an empty label.
pub fn format_time_12h(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }

    let mut parts = time.split(':');
    let hour: u32 = parts
        .next()
        .and_then(|h| h.trim().parse().ok())
        .unwrap_or(0);
    let minutes = parts.next().unwrap_or("00");

    let period = if hour >= 12 { "pm" } else { "am" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };

    format!("{display_hour}:{minutes}{period}")
}
