//! Stats client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Where and how to reach the controller's JSON API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatsClientConfig {
    /// Controller root URL (e.g. `http://192.168.1.10:8080/`).
    pub base_url: String,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
}

impl StatsClientConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StatsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/".to_string(),
            timeout_secs: 10,
        }
    }
}
