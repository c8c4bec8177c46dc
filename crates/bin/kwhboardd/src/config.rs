//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `kwhboard.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::path::PathBuf;
use std::time::Duration;

use kwhboard_adapter_stats_reqwest::StatsClientConfig;
use kwhboard_app::refresh::TICK_PERIOD;
use kwhboard_domain::id::DeviceIdx;
use kwhboard_domain::params::RawParams;
use kwhboard_domain::theme::{ChartTheme, WeekdayLabels};
use kwhboard_domain::time::DAYS_PER_WEEK;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Controller connection.
    pub stats: StatsConfig,
    /// Widget refresh and output.
    pub chart: ChartConfig,
    /// Chart colours.
    pub theme: ChartTheme,
    /// Hardware parameters checked at startup.
    pub hardware: HardwareConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Controller connection and the metering device to chart.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    #[serde(flatten)]
    pub client: StatsClientConfig,
    /// Device whose usage is charted.
    pub device_idx: DeviceIdx,
}

/// Widget refresh timer and chart output.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Period of the refresh timer, in seconds. Must be 60: the hourly
    /// refresh looks at the wall-clock minute once per tick.
    pub refresh_interval_secs: u64,
    /// Directory receiving `daily.json` and `weekly.json`.
    pub output_dir: PathBuf,
    /// Translated weekday names, Sunday first. English when absent.
    pub weekday_labels: Option<Vec<String>>,
}

/// Hardware parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Poll interval in seconds, as entered by the user.
    pub poll_interval: Option<PollInterval>,
}

/// Poll interval as written in the file: `30` or `"30"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PollInterval {
    Number(i64),
    Text(String),
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `kwhboard.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration does not validate.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("kwhboard.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("KWHBOARD_STATS_URL") {
            self.stats.client.base_url = val;
        }
        if let Some(val) = lookup("KWHBOARD_DEVICE_IDX") {
            self.stats.device_idx = val.parse().map_err(|_| {
                ConfigError::Validation(format!("KWHBOARD_DEVICE_IDX '{val}' is not a device idx"))
            })?;
        }
        if let Some(val) = lookup("KWHBOARD_OUTPUT_DIR") {
            self.chart.output_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("KWHBOARD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.stats.client.base_url).map_err(|err| {
            ConfigError::Validation(format!(
                "stats.base_url '{}' is not a valid URL: {err}",
                self.stats.client.base_url
            ))
        })?;
        if self.refresh_interval() != TICK_PERIOD {
            return Err(ConfigError::Validation(format!(
                "chart.refresh_interval_secs must be {}, got {}",
                TICK_PERIOD.as_secs(),
                self.chart.refresh_interval_secs
            )));
        }
        if let Some(labels) = &self.chart.weekday_labels
            && labels.len() != DAYS_PER_WEEK
        {
            return Err(ConfigError::Validation(format!(
                "chart.weekday_labels needs {DAYS_PER_WEEK} entries, got {}",
                labels.len()
            )));
        }
        Ok(())
    }

    /// Period of the widget's refresh timer.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.chart.refresh_interval_secs)
    }

    /// Weekday labels, English unless configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the configured list does not
    /// hold exactly seven names.
    pub fn weekday_labels(&self) -> Result<WeekdayLabels, ConfigError> {
        match &self.chart.weekday_labels {
            None => Ok(WeekdayLabels::default()),
            Some(labels) => WeekdayLabels::try_from(labels.clone()).map_err(|labels| {
                ConfigError::Validation(format!(
                    "chart.weekday_labels needs {DAYS_PER_WEEK} entries, got {}",
                    labels.len()
                ))
            }),
        }
    }

    /// Hardware parameters as the form would receive them from the controller.
    #[must_use]
    pub fn hardware_params(&self) -> RawParams {
        match &self.hardware.poll_interval {
            None => RawParams::default(),
            Some(PollInterval::Number(value)) => RawParams::new(value.to_string()),
            Some(PollInterval::Text(value)) => RawParams::new(value.as_str()),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            client: StatsClientConfig::default(),
            device_idx: DeviceIdx::new(0),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: TICK_PERIOD.as_secs(),
            output_dir: PathBuf::from("charts"),
            weekday_labels: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "kwhboardd=info,kwhboard=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overridden(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).cloned())?;
        Ok(config)
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.stats.client.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.stats.client.timeout_secs, 10);
        assert_eq!(config.stats.device_idx, DeviceIdx::new(0));
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.chart.output_dir, PathBuf::from("charts"));
        assert!(config.hardware.poll_interval.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.chart.refresh_interval_secs, 60);
        assert_eq!(config.theme, ChartTheme::default());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [stats]
            base_url = 'http://192.168.1.10:8080/'
            device_idx = 1768
            timeout_secs = 3

            [chart]
            refresh_interval_secs = 60
            output_dir = '/var/lib/kwhboard'
            weekday_labels = [
                'Dimanche', 'Lundi', 'Mardi', 'Mercredi', 'Jeudi', 'Vendredi', 'Samedi',
            ]

            [theme]
            colors = ['#111111', '#222222']
            axis_label_color = 'black'

            [hardware]
            poll_interval = 45

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.stats.client.base_url, "http://192.168.1.10:8080/");
        assert_eq!(config.stats.device_idx, DeviceIdx::new(1768));
        assert_eq!(config.stats.client.timeout_secs, 3);
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.chart.output_dir, PathBuf::from("/var/lib/kwhboard"));
        assert_eq!(config.theme.color(1), "#222222");
        assert_eq!(config.theme.axis_label_color, "black");
        assert_eq!(config.theme.weekday_colors, ChartTheme::default().weekday_colors);
        assert_eq!(config.hardware_params(), RawParams::new("45"));
        assert_eq!(config.logging.filter, "debug");

        let labels = config.weekday_labels().unwrap();
        assert_eq!(labels.label(kwhboard_domain::time::WEEKDAYS[1]), "Lundi");
    }

    #[test]
    fn should_accept_poll_interval_as_text() {
        let config: Config = toml::from_str("[hardware]\npoll_interval = ' 120 '").unwrap();
        assert_eq!(config.hardware_params(), RawParams::new(" 120 "));
    }

    #[test]
    fn should_leave_poll_interval_unset_by_default() {
        let config = Config::default();
        assert!(config.hardware_params().is_unset());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.chart.refresh_interval_secs, 60);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let config = overridden(&[
            ("KWHBOARD_STATS_URL", "http://controller/"),
            ("KWHBOARD_DEVICE_IDX", "42"),
            ("KWHBOARD_OUTPUT_DIR", "/tmp/charts"),
            ("KWHBOARD_LOG", "trace"),
        ])
        .unwrap();
        assert_eq!(config.stats.client.base_url, "http://controller/");
        assert_eq!(config.stats.device_idx, DeviceIdx::new(42));
        assert_eq!(config.chart.output_dir, PathBuf::from("/tmp/charts"));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_prefer_rust_log_over_kwhboard_log() {
        let config = overridden(&[("KWHBOARD_LOG", "trace"), ("RUST_LOG", "warn")]).unwrap();
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_reject_invalid_device_override() {
        let result = overridden(&[("KWHBOARD_DEVICE_IDX", "meter")]);
        assert!(matches!(result, Err(ConfigError::Validation(msg)) if msg.contains("meter")));
    }

    #[test]
    fn should_reject_negative_device_override() {
        let result = overridden(&[("KWHBOARD_DEVICE_IDX", "-3")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_invalid_base_url() {
        let mut config = Config::default();
        config.stats.client.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_refresh_interval_other_than_one_minute() {
        for secs in [0, 30, 59, 61, 120] {
            let mut config = Config::default();
            config.chart.refresh_interval_secs = secs;
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{secs} s accepted"
            );
        }
    }

    #[test]
    fn should_accept_one_minute_refresh_interval() {
        let config: Config = toml::from_str("[chart]\nrefresh_interval_secs = 60").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_interval(), TICK_PERIOD);
    }

    #[test]
    fn should_reject_incomplete_weekday_labels() {
        let mut config = Config::default();
        config.chart.weekday_labels = Some(vec!["Sun".to_string(), "Mon".to_string()]);
        assert!(config.validate().is_err());
        assert!(config.weekday_labels().is_err());
    }

    #[test]
    fn should_default_to_english_labels() {
        let labels = Config::default().weekday_labels().unwrap();
        assert_eq!(labels, WeekdayLabels::default());
    }
}
