//! Declarative chart definitions in the shape the charting library expects.
//!
//! Two definitions exist: the *hourly* column chart (one bar per hour of a
//! day) and the *weekly* column chart (one bar per weekday). They are built
//! by [`ChartDefinition::hourly`] and [`ChartDefinition::weekly`] from an
//! injected [`ChartTheme`] and then only ever updated through the setters
//! below, which copy data in rather than sharing it.

use chrono::Weekday;
use serde::Serialize;

use crate::theme::{ChartTheme, WeekdayLabels};
use crate::time::{WEEKDAYS, weekday_index};

/// Title of the hourly chart when no weekday prefix applies.
pub const HOURLY_TITLE: &str = "Hourly Energy Usage";

/// Title of the weekly chart.
pub const WEEKLY_TITLE: &str = "Weekly Energy Usage";

/// One hour, in milliseconds.
const HOUR_MS: u64 = 3_600_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_rotation: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Datetime,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxis {
    #[serde(rename = "type")]
    pub kind: AxisType,
    pub labels: AxisLabels,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_range: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub labels: AxisLabels,
    pub title: AxisTitle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesOptions {
    pub animation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOptions {
    pub point_padding: f64,
    pub border_width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotOptions {
    pub series: SeriesOptions,
    pub column: ColumnOptions,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            series: SeriesOptions { animation: false },
            column: ColumnOptions {
                point_padding: 0.2,
                border_width: 0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesTooltip {
    pub value_suffix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Column,
}

/// Series points: plain values on a time axis, or `(category, value)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<f64>),
    Categories(Vec<(String, f64)>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesType,
    pub y_axis: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_interval: Option<u64>,
    pub color: String,
    pub tooltip: SeriesTooltip,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_by_point: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    pub data: SeriesData,
}

impl ChartSeries {
    fn usage(id: &str, color: &str, data: SeriesData) -> Self {
        Self {
            id: id.to_string(),
            name: "Usage".to_string(),
            kind: SeriesType::Column,
            y_axis: 0,
            point_interval: None,
            color: color.to_string(),
            tooltip: SeriesTooltip {
                value_suffix: " Wh".to_string(),
            },
            color_by_point: None,
            group_padding: None,
            colors: None,
            data,
        }
    }
}

/// A complete chart definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefinition {
    pub title: Title,
    pub x_axis: XAxis,
    pub y_axis: Vec<YAxis>,
    pub legend: Legend,
    pub plot_options: PlotOptions,
    pub series: Vec<ChartSeries>,
}

fn usage_axis(color: &str) -> YAxis {
    let style = TextStyle {
        color: Some(color.to_string()),
        ..TextStyle::default()
    };
    YAxis {
        labels: AxisLabels {
            format: Some("{value} Watt".to_string()),
            style: Some(style.clone()),
            ..AxisLabels::default()
        },
        title: AxisTitle {
            text: "Usage (Wh)".to_string(),
            style,
        },
    }
}

impl ChartDefinition {
    /// Hourly usage chart with an empty series.
    #[must_use]
    pub fn hourly(theme: &ChartTheme) -> Self {
        let mut series =
            ChartSeries::usage("dailyhour", theme.color(0), SeriesData::Values(Vec::new()));
        series.point_interval = Some(HOUR_MS);

        Self {
            title: Title {
                text: HOURLY_TITLE.to_string(),
            },
            x_axis: XAxis {
                kind: AxisType::Datetime,
                labels: AxisLabels {
                    format: Some("{value:%H:%M}".to_string()),
                    overflow: Some("justify".to_string()),
                    ..AxisLabels::default()
                },
                min_range: Some(23 * HOUR_MS),
            },
            y_axis: vec![usage_axis(&theme.axis_label_color)],
            legend: Legend { enabled: false },
            plot_options: PlotOptions::default(),
            series: vec![series],
        }
    }

    /// Weekly usage chart with one zero-valued column per weekday.
    #[must_use]
    pub fn weekly(theme: &ChartTheme, labels: &WeekdayLabels) -> Self {
        let points = labels
            .as_slice()
            .iter()
            .map(|label| (label.clone(), 0.0))
            .collect();
        let mut series =
            ChartSeries::usage("weekdayhour", theme.color(0), SeriesData::Categories(points));
        series.color_by_point = Some(true);
        series.group_padding = Some(0.0);
        series.colors = Some(theme.weekday_colors.to_vec());

        Self {
            title: Title {
                text: WEEKLY_TITLE.to_string(),
            },
            x_axis: XAxis {
                kind: AxisType::Category,
                labels: AxisLabels {
                    auto_rotation: Some(vec![-45, -90]),
                    style: Some(TextStyle {
                        color: None,
                        font_size: Some("13px".to_string()),
                        font_family: Some("Verdana, sans-serif".to_string()),
                    }),
                    ..AxisLabels::default()
                },
                min_range: None,
            },
            y_axis: vec![usage_axis(theme.color(1))],
            legend: Legend { enabled: false },
            plot_options: PlotOptions::default(),
            series: vec![series],
        }
    }

    /// Replace the chart title.
    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title.text = text.into();
    }

    /// Replace the first series' values with a copy of `values`.
    pub fn set_values(&mut self, values: &[f64]) {
        if let Some(series) = self.series.first_mut() {
            series.data = SeriesData::Values(values.to_vec());
        }
    }

    /// Set the value of each weekday category from `totals` (Sunday first);
    /// days missing from `totals` drop to zero.
    pub fn set_weekday_totals(&mut self, totals: &[f64]) {
        let Some(series) = self.series.first_mut() else {
            return;
        };
        if let SeriesData::Categories(points) = &mut series.data {
            for (index, point) in points.iter_mut().enumerate() {
                point.1 = totals.get(index).copied().unwrap_or_default();
            }
        }
    }

    /// Values of the first series, when it is a time series.
    #[must_use]
    pub fn values(&self) -> Option<&[f64]> {
        match self.series.first().map(|series| &series.data) {
            Some(SeriesData::Values(values)) => Some(values),
            _ => None,
        }
    }

    /// Value of the weekday category for `day`, when this is a category chart.
    #[must_use]
    pub fn weekday_total(&self, day: Weekday) -> Option<f64> {
        match self.series.first().map(|series| &series.data) {
            Some(SeriesData::Categories(points)) => {
                points.get(weekday_index(day)).map(|(_, value)| *value)
            }
            _ => None,
        }
    }
}

/// The two definitions rendered by the usage chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub daily: ChartDefinition,
    pub weekly: ChartDefinition,
}

impl ChartSet {
    /// Fresh definitions built from the templates.
    #[must_use]
    pub fn new(theme: &ChartTheme, labels: &WeekdayLabels) -> Self {
        Self {
            daily: ChartDefinition::hourly(theme),
            weekly: ChartDefinition::weekly(theme, labels),
        }
    }

    /// Weekly totals as displayed, Sunday first.
    #[must_use]
    pub fn weekly_totals(&self) -> Vec<f64> {
        WEEKDAYS
            .iter()
            .filter_map(|day| self.weekly.weekday_total(*day))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_hourly_template() {
        let chart = ChartDefinition::hourly(&ChartTheme::default());
        assert_eq!(chart.title.text, HOURLY_TITLE);
        assert_eq!(chart.values(), Some(&[][..]));
        assert_eq!(chart.series[0].point_interval, Some(HOUR_MS));
        assert_eq!(chart.series[0].color, "#7cb5ec");
    }

    #[test]
    fn should_build_weekly_template_with_zeroed_days() {
        let chart = ChartDefinition::weekly(&ChartTheme::default(), &WeekdayLabels::default());
        assert_eq!(chart.title.text, WEEKLY_TITLE);
        for day in WEEKDAYS {
            assert_eq!(chart.weekday_total(day), Some(0.0));
        }
        assert_eq!(chart.series[0].colors.as_ref().map(Vec::len), Some(7));
    }

    #[test]
    fn should_take_axis_colours_from_theme() {
        let theme = ChartTheme {
            colors: vec!["#111111".to_string(), "#222222".to_string()],
            axis_label_color: "#333333".to_string(),
            ..ChartTheme::default()
        };
        let hourly = ChartDefinition::hourly(&theme);
        let weekly = ChartDefinition::weekly(&theme, &WeekdayLabels::default());
        assert_eq!(hourly.y_axis[0].title.style.color.as_deref(), Some("#333333"));
        assert_eq!(weekly.y_axis[0].title.style.color.as_deref(), Some("#222222"));
        assert_eq!(weekly.series[0].color, "#111111");
    }

    #[test]
    fn should_copy_values_instead_of_sharing() {
        let mut chart = ChartDefinition::hourly(&ChartTheme::default());
        let mut source = vec![1.0, 2.0];
        chart.set_values(&source);
        source[0] = 99.0;
        assert_eq!(chart.values(), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn should_zero_missing_weekday_totals() {
        let mut chart = ChartDefinition::weekly(&ChartTheme::default(), &WeekdayLabels::default());
        chart.set_weekday_totals(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(chart.weekday_total(Weekday::Sat), Some(7.0));

        chart.set_weekday_totals(&[]);
        assert_eq!(chart.weekday_total(Weekday::Sat), Some(0.0));
    }

    #[test]
    fn should_keep_templates_independent() {
        let theme = ChartTheme::default();
        let mut first = ChartSet::new(&theme, &WeekdayLabels::default());
        let second = ChartSet::new(&theme, &WeekdayLabels::default());
        first.daily.set_title("Monday Hourly Energy Usage");
        first.daily.set_values(&[5.0]);
        assert_eq!(second.daily.title.text, HOURLY_TITLE);
        assert_eq!(second.daily.values(), Some(&[][..]));
    }

    #[test]
    fn should_serialize_in_charting_library_shape() {
        let chart = ChartDefinition::weekly(&ChartTheme::default(), &WeekdayLabels::default());
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["xAxis"]["type"], "category");
        assert_eq!(json["xAxis"]["labels"]["autoRotation"][0], -45);
        assert_eq!(json["plotOptions"]["column"]["borderWidth"], 0);
        assert_eq!(json["series"][0]["type"], "column");
        assert_eq!(json["series"][0]["colorByPoint"], true);
        assert_eq!(json["series"][0]["tooltip"]["valueSuffix"], " Wh");
        assert_eq!(json["series"][0]["data"][0][0], "Sunday");
        assert!(json["series"][0].get("pointInterval").is_none());
    }
}
