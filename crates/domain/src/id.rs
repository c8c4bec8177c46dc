//! Typed identifier for controller devices.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Row index of a metering device on the home-automation controller (`idx`).
///
/// Scopes every stats query issued by the usage chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceIdx(u64);

impl DeviceIdx {
    /// Wrap a raw controller index.
    #[must_use]
    pub const fn new(idx: u64) -> Self {
        Self(idx)
    }

    /// Access the raw index.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for DeviceIdx {
    fn from(idx: u64) -> Self {
        Self(idx)
    }
}

impl fmt::Display for DeviceIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeviceIdx {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
