//! # kwhboard-adapter-stats-reqwest
//!
//! [`StatsSource`] implementation over the controller's JSON command API.
//!
//! ## Request
//!
//! `GET {base_url}json.htm?type=command&param=getkwhstats&idx={device}`
//!
//! ## Response
//!
//! `{ "status": "OK", "result": { ...StatsResult... } }`. Any other status,
//! a non-2xx HTTP answer, or an undecodable body is reported as a
//! [`FetchError`].
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `kwhboard-app` and `kwhboard-domain`.

mod config;
mod error;

pub use config::StatsClientConfig;
pub use error::StatsClientError;

use kwhboard_app::ports::StatsSource;
use kwhboard_domain::error::FetchError;
use kwhboard_domain::id::DeviceIdx;
use kwhboard_domain::stats::{StatsEnvelope, StatsResult};
use url::Url;

/// Controller endpoint serving JSON commands, relative to the base URL.
const COMMAND_PATH: &str = "json.htm";

/// HTTP client for the controller's `getkwhstats` command.
#[derive(Debug, Clone)]
pub struct HttpStatsSource {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpStatsSource {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StatsClientError::InvalidUrl`] if `base_url` does not parse,
    /// or [`StatsClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &StatsClientConfig) -> Result<Self, StatsClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("kwhboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::from_reqwest(&config.base_url, http)
    }

    /// Build a client around an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsClientError::InvalidUrl`] if `base_url` does not parse.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, StatsClientError> {
        let mut base_url = Url::parse(base_url)?;
        // join() replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    /// Full command URL for `device`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsClientError::InvalidUrl`] if the command path cannot be
    /// joined onto the base URL.
    pub fn stats_url(&self, device: DeviceIdx) -> Result<Url, StatsClientError> {
        let mut url = self.base_url.join(COMMAND_PATH)?;
        url.query_pairs_mut()
            .append_pair("type", "command")
            .append_pair("param", "getkwhstats")
            .append_pair("idx", &device.to_string());
        Ok(url)
    }

    async fn get_envelope(&self, device: DeviceIdx) -> Result<StatsEnvelope, StatsClientError> {
        let url = self.stats_url(device)?;
        tracing::debug!(%url, "GET stats");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StatsClientError::HttpStatus(status.as_u16()));
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(StatsClientError::Decode)
    }
}

impl StatsSource for HttpStatsSource {
    async fn fetch(&self, device: DeviceIdx) -> Result<StatsResult, FetchError> {
        let envelope = self.get_envelope(device).await?;
        envelope.into_result()
    }
}
