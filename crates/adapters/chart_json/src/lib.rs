//! # kwhboard-adapter-chart-json
//!
//! [`ChartRenderer`] that hands chart definitions to a browser-side charting
//! library by writing them as JSON files:
//!
//! | File | Content |
//! |------|---------|
//! | `daily.json` | hourly usage of the selected day |
//! | `weekly.json` | daily totals per weekday |
//!
//! Files are written to a temporary name and renamed into place, so a page
//! polling the directory never reads a half-written definition.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `kwhboard-app` and `kwhboard-domain`.

use std::fs;
use std::path::{Path, PathBuf};

use kwhboard_app::ports::ChartRenderer;
use kwhboard_domain::chart::{ChartDefinition, ChartSet};

/// File name of the hourly chart definition.
pub const DAILY_FILE: &str = "daily.json";

/// File name of the weekly chart definition.
pub const WEEKLY_FILE: &str = "weekly.json";

/// Errors raised while writing chart files.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Serialising a definition failed.
    #[error("failed to serialize chart definition")]
    Serialize(#[from] serde_json::Error),

    /// Creating or writing a file failed.
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes chart definitions into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileRenderer {
    dir: PathBuf,
}

impl JsonFileRenderer {
    /// Render into `dir`, created on first write if missing.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write both definitions.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the directory cannot be created or a
    /// file cannot be written.
    pub fn write(&self, charts: &ChartSet) -> Result<(), RenderError> {
        fs::create_dir_all(&self.dir).map_err(|source| RenderError::Io {
            path: self.dir.clone(),
            source,
        })?;
        self.write_one(DAILY_FILE, &charts.daily)?;
        self.write_one(WEEKLY_FILE, &charts.weekly)?;
        Ok(())
    }

    fn write_one(&self, name: &str, chart: &ChartDefinition) -> Result<(), RenderError> {
        let body = serde_json::to_vec_pretty(chart)?;
        let target = self.dir.join(name);
        let staging = self.dir.join(format!(".{name}.tmp"));

        fs::write(&staging, body).map_err(|source| RenderError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &target).map_err(|source| RenderError::Io {
            path: target,
            source,
        })
    }
}

impl ChartRenderer for JsonFileRenderer {
    fn render(&self, charts: &ChartSet) {
        if let Err(err) = self.write(charts) {
            tracing::warn!(error = %err, dir = %self.dir.display(), "failed to write charts");
            return;
        }
        tracing::debug!(
            dir = %self.dir.display(),
            title = %charts.daily.title.text,
            "charts written"
        );
    }
}
