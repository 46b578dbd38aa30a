//! Presentation labels for processed blocks.

use serde::{Deserialize, Serialize};

use crate::record::{EventRecord, Status};
use crate::time::format_time_12h;

/// How the calendar shows one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDisplay {
    /// e.g. `event-busy`, `event-special-busy`.
    pub css_class: String,
    /// e.g. `Busy`, `BOOKED`, `FREE`.
    pub label: String,
    /// e.g. `9:00am - 12:00pm`.
    pub time_label: String,
}

impl BlockDisplay {
    pub fn for_block(block: &EventRecord) -> Self {
        let (css_class, label) = if block.is_special() {
            if block.status == Status::Busy {
                ("event-special-busy".to_string(), "BOOKED".to_string())
            } else {
                ("event-special-available".to_string(), "FREE".to_string())
            }
        } else {
            (
                format!("event-{}", block.status.as_str().to_lowercase()),
                block.status.to_string(),
            )
        };

        Self {
            css_class,
            label,
            time_label: time_label(block),
        }
    }
}

/// `"{start} - {end}"` in 12-hour form.
pub fn time_label(block: &EventRecord) -> String {
    format!(
        "{} - {}",
        format_time_12h(&block.start_time),
        format_time_12h(&block.end_time)
    )
}
