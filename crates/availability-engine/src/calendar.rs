//! Week-by-week view state for the availability calendar.
//!
//! [`CalendarView`] is a plain value: which weeks exist and which one is on
//! screen. [`CalendarView::render_week`] is a pure function of that state and
//! the loaded records.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::record::EventRecord;
use crate::selection::{schedule_for_date, DaySchedule};

/// Current week plus four more.
pub const DEFAULT_WEEKS_TO_SHOW: usize = 5;

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The seven dates of one week, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDays {
    pub start: NaiveDate,
    pub days: [NaiveDate; 7],
}

impl WeekDays {
    pub fn starting(start: NaiveDate) -> Self {
        let days = std::array::from_fn(|i| start + Duration::days(i as i64));
        Self { start, days }
    }

    /// The Saturday closing the week.
    pub fn end(&self) -> NaiveDate {
        self.days[6]
    }

    /// `"Week of Mar 15 - Mar 21"`.
    pub fn heading(&self) -> String {
        format!(
            "Week of {} - {}",
            self.start.format("%b %-d"),
            self.end().format("%b %-d")
        )
    }
}

/// A rendered week: heading, navigation state and one schedule per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub heading: String,
    pub week_index: usize,
    pub is_current_week: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub days: Vec<DaySchedule>,
}

/// Which weeks the calendar offers and which one is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    first_week: NaiveDate,
    weeks_to_show: usize,
    current_week: usize,
}

impl CalendarView {
    /// Start on the week containing `today`, showing [`DEFAULT_WEEKS_TO_SHOW`] weeks.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            first_week: week_start(today),
            weeks_to_show: DEFAULT_WEEKS_TO_SHOW,
            current_week: 0,
        }
    }

    /// At least one week is always shown. Clamps the current index if needed.
    pub fn with_weeks_to_show(mut self, weeks: usize) -> Self {
        self.weeks_to_show = weeks.max(1);
        self.current_week = self.current_week.min(self.weeks_to_show - 1);
        self
    }

    pub fn weeks_to_show(&self) -> usize {
        self.weeks_to_show
    }

    pub fn current_index(&self) -> usize {
        self.current_week
    }

    pub fn can_go_back(&self) -> bool {
        self.current_week > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_week + 1 < self.weeks_to_show
    }

    /// Move `direction` weeks. Does nothing, and returns `false`, when the
    /// target falls outside the shown weeks.
    pub fn navigate(&mut self, direction: i32) -> bool {
        let target = self.current_week as i64 + i64::from(direction);
        if direction == 0 || target < 0 || target >= self.weeks_to_show as i64 {
            return false;
        }
        self.current_week = target as usize;
        true
    }

    /// Jump back to the first week. Returns `false` if already there.
    pub fn navigate_to_current(&mut self) -> bool {
        if self.current_week == 0 {
            return false;
        }
        self.current_week = 0;
        true
    }

    /// Jump to `index`. Returns `false` when it is out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.weeks_to_show {
            return false;
        }
        self.current_week = index;
        true
    }

    pub fn week(&self, index: usize) -> Option<WeekDays> {
        (index < self.weeks_to_show)
            .then(|| WeekDays::starting(self.first_week + Duration::weeks(index as i64)))
    }

    pub fn current_week(&self) -> WeekDays {
        WeekDays::starting(self.first_week + Duration::weeks(self.current_week as i64))
    }

    /// Build the schedule of every day in the current week.
    pub fn render_week(&self, events: &[EventRecord]) -> WeekSchedule {
        let week = self.current_week();
        let days = week
            .days
            .iter()
            .map(|&date| schedule_for_date(events, date))
            .collect();

        WeekSchedule {
            heading: week.heading(),
            week_index: self.current_week,
            is_current_week: self.current_week == 0,
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
            days,
        }
    }
}
