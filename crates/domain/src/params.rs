//! Hardware extension parameters: the controller poll interval (`Mode1`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of the poll interval, in seconds.
pub const POLL_INTERVAL_MIN: i64 = 10;

/// Upper bound of the poll interval, in seconds.
pub const POLL_INTERVAL_MAX: i64 = 3600;

/// Value used when the host form has no poll interval yet.
pub const POLL_INTERVAL_DEFAULT: i64 = 30;

/// Label shown next to validation messages.
pub const POLL_INTERVAL_LABEL: &str = "Poll Interval";

/// Kinds of validators a host form can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidatorKind {
    Integer,
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("Integer"),
        }
    }
}

/// Untyped parameter data as held by the host form. An empty `Mode1` means
/// the hardware has never been configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParams {
    #[serde(rename = "Mode1", default)]
    pub mode1: String,
}

impl RawParams {
    #[must_use]
    pub fn new(mode1: impl Into<String>) -> Self {
        Self {
            mode1: mode1.into(),
        }
    }

    /// Whether `Mode1` was never set.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.mode1.trim().is_empty()
    }
}

/// Validated hardware parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Poll interval in seconds, within `10..=3600`.
    #[serde(rename = "Mode1")]
    pub mode1: u32,
}

impl ParamRecord {
    /// Poll interval as a duration.
    #[must_use]
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.mode1))
    }
}
