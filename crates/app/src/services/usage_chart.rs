//! Usage chart: day selection, periodic refresh and reshaping of energy
//! statistics into the hourly and weekly chart definitions.
//!
//! ## States
//!
//! ```text
//! Uninitialized ──first successful fetch──▶ Day(today)
//!       │                                      ▲  │
//!       └──select Daily──▶ Daily ◀──select─────┘  ▼
//!                                             Day(other)
//! ```
//!
//! Re-selecting the active day (or `Daily` before the first fetch) bypasses
//! the cached arrays and fetches again; any other selection only reshapes
//! what is already there.

use chrono::{Datelike, Timelike};

use kwhboard_domain::chart::{ChartSet, HOURLY_TITLE};
use kwhboard_domain::error::FetchError;
use kwhboard_domain::id::DeviceIdx;
use kwhboard_domain::stats::StatsResult;
use kwhboard_domain::theme::{ChartTheme, WeekdayLabels};
use kwhboard_domain::view::{DaySelection, ViewState};

use crate::ports::{ChartRenderer, Clock, StatsSource};

/// Wall-clock minute at which the timer triggers the hourly refresh.
pub const REFRESH_MINUTE: u32 = 1;

/// Usage chart widget bound to one metering device.
pub struct UsageChartWidget<S, C, R> {
    device: DeviceIdx,
    source: S,
    clock: C,
    renderer: R,
    labels: WeekdayLabels,
    view: ViewState,
    stats: StatsResult,
    charts: ChartSet,
}

impl<S, C, R> UsageChartWidget<S, C, R>
where
    S: StatsSource,
    C: Clock,
    R: ChartRenderer,
{
    /// Create a widget with fresh chart definitions built from `theme`.
    ///
    /// Nothing is fetched until [`fetch_stats`](Self::fetch_stats) runs,
    /// normally from [`MountedChart::mount`](crate::refresh::MountedChart::mount).
    pub fn new(
        device: DeviceIdx,
        source: S,
        clock: C,
        renderer: R,
        theme: &ChartTheme,
        labels: WeekdayLabels,
    ) -> Self {
        let charts = ChartSet::new(theme, &labels);
        Self {
            device,
            source,
            clock,
            renderer,
            labels,
            view: ViewState::default(),
            stats: StatsResult::default(),
            charts,
        }
    }

    /// Device the widget is bound to.
    pub fn device(&self) -> DeviceIdx {
        self.device
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Backing arrays of the last fetch.
    pub fn stats(&self) -> &StatsResult {
        &self.stats
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    /// Selector button class for `day`.
    pub fn active_class(&self, day: DaySelection) -> &'static str {
        self.view.active_class(day)
    }

    /// Fetch fresh statistics and rebuild both charts.
    ///
    /// On failure the displayed arrays are emptied and the charts rendered
    /// empty; the error is returned for the caller to log.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] reported by the stats source.
    #[tracing::instrument(skip(self), fields(device = %self.device))]
    pub async fn fetch_stats(&mut self) -> Result<(), FetchError> {
        match self.source.fetch(self.device).await {
            Ok(stats) => {
                self.apply_stats(stats);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, reason = err.reason_code(), "stats fetch failed");
                self.stats.clear_displayed();
                self.charts
            .weekly
            .set_weekday_totals(&self.stats.weekday_kwh);
                self.refresh_daily_series();
                self.render();
                Err(err)
            }
        }
    }

    fn apply_stats(&mut self, mut stats: StatsResult) {
        let now = self.clock.now();
        let today = now.weekday();

        stats.blend_today(today);
        self.stats = stats;
        self.view.current_day = Some(today);
        self.charts
            .weekly
            .set_weekday_totals(&self.stats.weekday_kwh);

        if self.view.selected.is_uninitialized() {
            self.view.last_refreshed_hour = Some(now.hour());
            self.view.selected = DaySelection::Day(today);
        }
        tracing::debug!(day = %self.view.selected, "stats applied");
        self.apply_day_selection(self.view.selected);
    }

    /// Handle a user selection.
    ///
    /// Selecting the day already shown, or `Daily` before anything was
    /// fetched, forces a fetch; any other day is served from the cached arrays.
    /// Selecting `Uninitialized` is ignored.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of a forced fetch.
    #[tracing::instrument(skip(self), fields(device = %self.device))]
    pub async fn select_day(&mut self, day: DaySelection) -> Result<(), FetchError> {
        if day.is_uninitialized() {
            return Ok(());
        }
        let bypass_cache = day == self.view.selected
            || (day == DaySelection::Daily && self.view.selected.is_uninitialized());
        if bypass_cache {
            self.view.selected = day;
            self.fetch_stats().await
        } else {
            self.apply_day_selection(day);
            Ok(())
        }
    }

    /// Show `day` from the cached arrays. No network call.
    pub fn apply_day_selection(&mut self, day: DaySelection) {
        self.view.selected = day;
        self.refresh_daily_series();
        self.render();
    }

    fn refresh_daily_series(&mut self) {
        match self.view.selected {
            DaySelection::Uninitialized => {}
            DaySelection::Daily => {
                self.charts.daily.set_title(HOURLY_TITLE);
                self.charts.daily.set_values(&self.stats.daily_hour_kwh);
            }
            DaySelection::Day(day) => {
                self.charts
                    .daily
                    .set_title(format!("{} {HOURLY_TITLE}", self.labels.label(day)));
                self.charts.daily.set_values(self.stats.hours_of(day));
            }
        }
    }

    /// Periodic timer callback.
    ///
    /// Fetches once an hour, on the tick that lands on minute
    /// [`REFRESH_MINUTE`]. Returns whether a fetch ran.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the refresh.
    pub async fn on_timer_tick(&mut self) -> Result<bool, FetchError> {
        let now = self.clock.now();
        if now.minute() != REFRESH_MINUTE {
            return Ok(false);
        }
        self.view.last_refreshed_hour = Some(now.hour());
        tracing::debug!(hour = now.hour(), "hourly refresh");
        self.fetch_stats().await?;
        Ok(true)
    }

    /// Rebind to another device and fetch its statistics.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the fetch for the new device.
    pub async fn on_device_changed(&mut self, device: DeviceIdx) -> Result<(), FetchError> {
        if device == self.device {
            return Ok(());
        }
        tracing::info!(from = %self.device, to = %device, "usage chart device changed");
        self.device = device;
        self.fetch_stats().await
    }

    fn render(&self) {
        self.renderer.render(&self.charts);
    }
}
