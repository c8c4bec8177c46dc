//! View state of the usage chart: which day is displayed and when data was
//! last refreshed.

use std::fmt;

use chrono::Weekday;

use crate::time::{weekday_from_index, weekday_index};

/// CSS class applied to the selector button of the active day.
pub const ACTIVE_CLASS: &str = "zoom-button-active";

/// Day shown by the hourly chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySelection {
    /// Nothing selected yet, no successful fetch so far.
    #[default]
    Uninitialized,
    /// Hourly averages across all days.
    Daily,
    /// Hourly averages of one weekday.
    Day(Weekday),
}

impl DaySelection {
    /// Integer code used by host UIs: `-2` uninitialized, `-1` daily,
    /// `0..=6` weekday with Sunday = 0.
    #[must_use]
    pub fn code(self) -> i8 {
        match self {
            Self::Uninitialized => -2,
            Self::Daily => -1,
            // weekday_index is at most 6
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            Self::Day(day) => weekday_index(day) as i8,
        }
    }

    #[must_use]
    pub fn is_uninitialized(self) -> bool {
        matches!(self, Self::Uninitialized)
    }
}

/// Error returned when a selection code is outside `-2..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid day selection code {0}")]
pub struct InvalidDayCode(pub i8);

impl TryFrom<i8> for DaySelection {
    type Error = InvalidDayCode;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -2 => Ok(Self::Uninitialized),
            -1 => Ok(Self::Daily),
            0..=6 => usize::try_from(code)
                .ok()
                .and_then(weekday_from_index)
                .map(Self::Day)
                .ok_or(InvalidDayCode(code)),
            _ => Err(InvalidDayCode(code)),
        }
    }
}

impl fmt::Display for DaySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::Daily => f.write_str("daily"),
            Self::Day(day) => write!(f, "{day}"),
        }
    }
}

/// State owned by the usage chart widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Day currently displayed by the hourly chart.
    pub selected: DaySelection,
    /// Weekday of the last successful fetch.
    pub current_day: Option<Weekday>,
    /// Hour of the last timer-driven refresh.
    pub last_refreshed_hour: Option<u32>,
}

impl ViewState {
    /// Selector button class for `day`.
    #[must_use]
    pub fn active_class(&self, day: DaySelection) -> &'static str {
        if self.selected == day { ACTIVE_CLASS } else { "" }
    }
}
