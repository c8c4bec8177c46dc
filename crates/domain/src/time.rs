//! Wall-clock helpers.
//!
//! The controller buckets energy by *local* hour and weekday, so everything
//! here works on naive local time rather than UTC.

use chrono::{Local, NaiveDateTime, Weekday};

/// Local wall-clock timestamp.
pub type LocalTime = NaiveDateTime;

/// Number of hourly buckets per day.
pub const HOURS_PER_DAY: usize = 24;

/// Number of weekday buckets per week.
pub const DAYS_PER_WEEK: usize = 7;

/// Weekdays in controller order (Sunday first).
pub const WEEKDAYS: [Weekday; DAYS_PER_WEEK] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Return the current local wall-clock time.
#[must_use]
pub fn now() -> LocalTime {
    Local::now().naive_local()
}

/// Index of `day` in the controller's weekday arrays (Sunday = 0).
#[must_use]
pub fn weekday_index(day: Weekday) -> usize {
    day.num_days_from_sunday() as usize
}

/// Inverse of [`weekday_index`]. Returns `None` for indices above 6.
#[must_use]
pub fn weekday_from_index(index: usize) -> Option<Weekday> {
    WEEKDAYS.get(index).copied()
}
