//! Chart palette and weekday labels, injected into the chart builders.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::time::{DAYS_PER_WEEK, weekday_index};

/// Colours used by the chart builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    /// Series palette. The first entry colours the hourly series, the second
    /// the weekly axis.
    pub colors: Vec<String>,
    /// Colour of the hourly chart's axis labels and title.
    pub axis_label_color: String,
    /// One column colour per weekday, Sunday first.
    pub weekday_colors: [String; DAYS_PER_WEEK],
}

impl ChartTheme {
    /// Palette colour at `index`, wrapping around; black when the palette is empty.
    #[must_use]
    pub fn color(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return "#000000";
        }
        &self.colors[index % self.colors.len()]
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            colors: [
                "#7cb5ec", "#434348", "#90ed7d", "#f7a35c", "#8085e9", "#f15c80", "#e4d354",
                "#2b908f", "#f45b5b", "#91e8e1",
            ]
            .map(String::from)
            .to_vec(),
            axis_label_color: "white".to_string(),
            weekday_colors: [
                "#0a9eaa", "#9215ac", "#861ec9", "#7a17e6", "#7010f9", "#691af3", "#00f194",
            ]
            .map(String::from),
        }
    }
}

/// Display names of the weekdays, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayLabels([String; DAYS_PER_WEEK]);

impl WeekdayLabels {
    /// Wrap translated names, Sunday first.
    #[must_use]
    pub fn new(labels: [String; DAYS_PER_WEEK]) -> Self {
        Self(labels)
    }

    /// Label for `day`.
    #[must_use]
    pub fn label(&self, day: Weekday) -> &str {
        &self.0[weekday_index(day)]
    }

    /// All labels, Sunday first.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for WeekdayLabels {
    fn default() -> Self {
        Self(
            [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .map(String::from),
        )
    }
}

impl TryFrom<Vec<String>> for WeekdayLabels {
    type Error = Vec<String>;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        <[String; DAYS_PER_WEEK]>::try_from(labels).map(Self)
    }
}
