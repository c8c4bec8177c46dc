//! Energy usage statistics as reported by the controller's `getkwhstats` command.
//!
//! All values are watt-hours. Arrays are index-addressed: hours `0..24`,
//! weekdays `0..7` with Sunday = 0.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::time::{DAYS_PER_WEEK, weekday_index};

/// Status string the controller uses for a successful command.
pub const STATUS_OK: &str = "OK";

/// Aggregated hourly / weekday energy usage for one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsResult {
    /// Running average per hour of day, all days blended.
    pub daily_hour_kwh: Vec<f64>,
    /// Running average per hour, one row per weekday.
    pub weekday_hour_kwh: Vec<Vec<f64>>,
    /// Raw per-hour usage of the day in progress.
    pub weekday_hour_kwh_raw: Vec<f64>,
    /// Running average daily total per weekday.
    pub weekday_kwh: Vec<f64>,
}

impl StatsResult {
    /// Sum of today's partial hourly values.
    #[must_use]
    pub fn today_partial_total(&self) -> f64 {
        self.weekday_hour_kwh_raw.iter().sum()
    }

    /// Blend today's partial total into `weekday_kwh[today]`.
    ///
    /// A zero slot is treated as "no history yet" and takes the partial total
    /// as is; otherwise the two are averaged.
    pub fn blend_today(&mut self, today: Weekday) {
        let total = self.today_partial_total();
        if let Some(slot) = self.weekday_kwh.get_mut(weekday_index(today)) {
            *slot = if *slot == 0.0 {
                total
            } else {
                (*slot + total) / 2.0
            };
        }
    }

    /// Hourly series for one weekday, or an empty slice when absent.
    #[must_use]
    pub fn hours_of(&self, day: Weekday) -> &[f64] {
        self.weekday_hour_kwh
            .get(weekday_index(day))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Daily total for one weekday, zero when absent.
    #[must_use]
    pub fn total_of(&self, day: Weekday) -> f64 {
        self.weekday_kwh
            .get(weekday_index(day))
            .copied()
            .unwrap_or_default()
    }

    /// Drop the displayed arrays after a failed fetch.
    ///
    /// The raw array of the day in progress is left untouched.
    pub fn clear_displayed(&mut self) {
        self.daily_hour_kwh.clear();
        self.weekday_hour_kwh.clear();
        self.weekday_kwh.clear();
    }

    /// Check the shape the widget relies on.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Malformed`] when `weekday_kwh` does not hold one
    /// entry per weekday.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.weekday_kwh.len() != DAYS_PER_WEEK {
            return Err(FetchError::Malformed(format!(
                "weekday_kwh has {} entries, expected {DAYS_PER_WEEK}",
                self.weekday_kwh.len()
            )));
        }
        Ok(())
    }
}

/// Wire envelope of a controller JSON command: `{ "status": ..., "result": ... }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<StatsResult>,
}

impl StatsEnvelope {
    /// Unwrap the envelope into a validated [`StatsResult`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Malformed`] if `status` or `result` is missing or
    /// the result has the wrong shape, and [`FetchError::Status`] if the
    /// status is anything but `OK`.
    pub fn into_result(self) -> Result<StatsResult, FetchError> {
        let result = self
            .result
            .ok_or_else(|| FetchError::Malformed("missing result".to_string()))?;
        let status = self
            .status
            .ok_or_else(|| FetchError::Malformed("missing status".to_string()))?;
        if status != STATUS_OK {
            return Err(FetchError::Status(status));
        }
        result.validate()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(values: [f64; 7]) -> Vec<f64> {
        values.to_vec()
    }

    #[test]
    fn should_take_partial_total_when_slot_is_empty() {
        let mut stats = StatsResult {
            weekday_hour_kwh_raw: vec![1.0, 2.0, 3.0],
            weekday_kwh: week([0.0; 7]),
            ..StatsResult::default()
        };
        stats.blend_today(Weekday::Wed);
        assert!((stats.total_of(Weekday::Wed) - 6.0).abs() < f64::EPSILON);
        assert!(stats.total_of(Weekday::Tue).abs() < f64::EPSILON);
    }

    #[test]
    fn should_average_partial_total_with_history() {
        let mut stats = StatsResult {
            weekday_hour_kwh_raw: vec![5.0, 15.0],
            weekday_kwh: week([0.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ..StatsResult::default()
        };
        stats.blend_today(Weekday::Mon);
        assert!((stats.total_of(Weekday::Mon) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_ignore_blend_when_weekday_array_is_short() {
        let mut stats = StatsResult {
            weekday_hour_kwh_raw: vec![1.0],
            ..StatsResult::default()
        };
        stats.blend_today(Weekday::Sat);
        assert!(stats.weekday_kwh.is_empty());
    }

    #[test]
    fn should_clear_displayed_arrays_but_keep_raw() {
        let mut stats = StatsResult {
            daily_hour_kwh: vec![1.0; 24],
            weekday_hour_kwh: vec![vec![1.0; 24]; 7],
            weekday_hour_kwh_raw: vec![2.0; 24],
            weekday_kwh: vec![3.0; 7],
        };
        stats.clear_displayed();
        assert!(stats.daily_hour_kwh.is_empty());
        assert!(stats.weekday_hour_kwh.is_empty());
        assert!(stats.weekday_kwh.is_empty());
        assert_eq!(stats.weekday_hour_kwh_raw.len(), 24);
    }

    #[test]
    fn should_return_empty_hours_for_missing_day() {
        let stats = StatsResult::default();
        assert!(stats.hours_of(Weekday::Fri).is_empty());
    }

    #[test]
    fn should_unwrap_ok_envelope() {
        let json = r#"{
            "status": "OK",
            "result": {
                "daily_hour_kwh": [1, 2],
                "weekday_hour_kwh": [[1], [2], [3], [4], [5], [6], [7]],
                "weekday_hour_kwh_raw": [0],
                "weekday_kwh": [10, 20, 30, 40, 50, 60, 70]
            }
        }"#;
        let envelope: StatsEnvelope = serde_json::from_str(json).unwrap();
        let stats = envelope.into_result().unwrap();
        assert_eq!(stats.daily_hour_kwh, vec![1.0, 2.0]);
        assert_eq!(stats.hours_of(Weekday::Sat), &[7.0]);
        assert!((stats.total_of(Weekday::Sun) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_non_ok_status() {
        let json = r#"{ "status": "ERR", "result": { "weekday_kwh": [0,0,0,0,0,0,0] } }"#;
        let envelope: StatsEnvelope = serde_json::from_str(json).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(matches!(err, FetchError::Status(ref s) if s == "ERR"));
    }

    #[test]
    fn should_reject_missing_result() {
        let envelope: StatsEnvelope = serde_json::from_str(r#"{ "status": "OK" }"#).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn should_reject_missing_status() {
        let json = r#"{ "result": { "weekday_kwh": [0,0,0,0,0,0,0] } }"#;
        let envelope: StatsEnvelope = serde_json::from_str(json).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn should_reject_short_weekday_totals() {
        let json = r#"{ "status": "OK", "result": { "weekday_kwh": [1, 2] } }"#;
        let envelope: StatsEnvelope = serde_json::from_str(json).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(FetchError::Malformed(_))
        ));
    }
}
