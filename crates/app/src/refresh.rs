//! Mount / unmount lifecycle of the usage chart and its refresh timer.
//!
//! Mounting runs the first fetch and spawns a tokio task that calls
//! [`UsageChartWidget::on_timer_tick`] every period (60 s in production).
//! The task handle is owned by [`MountedChart`]; unmounting or dropping it
//! aborts the task, so no tick can fire against a torn-down widget.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::ports::{ChartRenderer, Clock, StatsSource};
use crate::services::usage_chart::UsageChartWidget;

/// Default period of the refresh timer.
pub const TICK_PERIOD: Duration = Duration::from_secs(60);

/// Widget shared between the host and its timer task.
pub type SharedWidget<S, C, R> = Arc<Mutex<UsageChartWidget<S, C, R>>>;

/// A mounted usage chart with its running refresh timer.
pub struct MountedChart<S, C, R> {
    widget: SharedWidget<S, C, R>,
    timer: Option<JoinHandle<()>>,
}

impl<S, C, R> MountedChart<S, C, R>
where
    S: StatsSource + 'static,
    C: Clock + 'static,
    R: ChartRenderer + 'static,
{
    /// Run the first fetch and start the refresh timer.
    ///
    /// A failed first fetch leaves the charts empty; the timer still starts.
    pub async fn mount(widget: UsageChartWidget<S, C, R>, period: Duration) -> Self {
        let device = widget.device();
        let widget = Arc::new(Mutex::new(widget));

        if widget.lock().await.fetch_stats().await.is_err() {
            tracing::info!(%device, "usage chart mounted without data");
        }

        let timer = tokio::spawn(run_timer(Arc::clone(&widget), period));
        tracing::info!(
            %device,
            period_secs = period.as_secs(),
            "usage chart refresh timer started"
        );

        Self {
            widget,
            timer: Some(timer),
        }
    }
}

impl<S, C, R> MountedChart<S, C, R> {
    /// The shared widget, for user interaction while mounted.
    pub fn widget(&self) -> &SharedWidget<S, C, R> {
        &self.widget
    }

    /// Whether the refresh timer is still installed.
    pub fn is_mounted(&self) -> bool {
        self.timer.is_some()
    }

    /// Cancel the refresh timer and clear its handle. Idempotent.
    ///
    /// A fetch already in flight inside the timer task is aborted with it.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
            tracing::debug!("usage chart refresh timer aborted");
        }
    }
}

impl<S, C, R> Drop for MountedChart<S, C, R> {
    fn drop(&mut self) {
        self.unmount();
    }
}

async fn run_timer<S, C, R>(widget: SharedWidget<S, C, R>, period: Duration)
where
    S: StatsSource,
    C: Clock,
    R: ChartRenderer,
{
    let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        let mut widget = widget.lock().await;
        // failures are logged by fetch_stats and leave the charts empty
        if let Ok(true) = widget.on_timer_tick().await {
            tracing::debug!(device = %widget.device(), "usage chart refreshed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::usage_chart::tests::{
        FakeSource, FixedClock, RecordingRenderer, make_widget, monday, sample_stats,
    };
    use chrono::{TimeDelta, Weekday};
    use kwhboard_domain::id::DeviceIdx;
    use kwhboard_domain::theme::{ChartTheme, WeekdayLabels};
    use kwhboard_domain::time::LocalTime;
    use kwhboard_domain::view::DaySelection;

    /// Wall clock that advances with tokio's (paused) time.
    struct TickingClock {
        start: Instant,
        base: LocalTime,
    }

    impl Clock for TickingClock {
        fn now(&self) -> LocalTime {
            self.base + TimeDelta::from_std(self.start.elapsed()).unwrap()
        }
    }

    async fn mount_at(
        minute: u32,
    ) -> (
        MountedChart<Arc<FakeSource>, Arc<FixedClock>, Arc<RecordingRenderer>>,
        Arc<FakeSource>,
        Arc<FixedClock>,
    ) {
        let source = FakeSource::with_stats(sample_stats());
        let clock = FixedClock::at(9, minute);
        let renderer = Arc::new(RecordingRenderer::default());
        let widget = make_widget(&source, &clock, &renderer);
        let mounted = MountedChart::mount(widget, TICK_PERIOD).await;
        (mounted, source, clock)
    }

    #[tokio::test(start_paused = true)]
    async fn should_fetch_once_on_mount() {
        let (mounted, source, _clock) = mount_at(1).await;
        assert!(mounted.is_mounted());
        assert_eq!(source.calls(), 1);
        assert_eq!(
            mounted.widget().lock().await.view().selected,
            DaySelection::Day(Weekday::Mon)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_tick_before_first_period() {
        let (_mounted, source, _clock) = mount_at(1).await;
        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_refresh_on_tick_at_minute_one() {
        let (_mounted, source, _clock) = mount_at(1).await;
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_refresh_on_other_minutes() {
        let (mounted, source, clock) = mount_at(30).await;
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(source.calls(), 1);

        clock.set(monday(10, 1));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(mounted.widget().lock().await.view().last_refreshed_hour, Some(10));
    }

    #[tokio::test(start_paused = true)]
    async fn should_refresh_once_per_hour_with_running_clock() {
        let source = FakeSource::with_stats(sample_stats());
        let clock = Arc::new(TickingClock {
            start: Instant::now(),
            base: monday(9, 0) + TimeDelta::seconds(30),
        });
        let widget = UsageChartWidget::new(
            DeviceIdx::new(1768),
            Arc::clone(&source),
            clock,
            Arc::new(RecordingRenderer::default()),
            &ChartTheme::default(),
            WeekdayLabels::default(),
        );
        let mounted = MountedChart::mount(widget, TICK_PERIOD).await;

        // ticks land at hh:mm:30, so minute 1 comes round once an hour
        tokio::time::sleep(Duration::from_secs(3 * 3600)).await;

        assert_eq!(source.calls(), 4);
        assert_eq!(mounted.widget().lock().await.view().last_refreshed_hour, Some(11));
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_fetching_after_unmount() {
        let (mut mounted, source, _clock) = mount_at(1).await;
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(source.calls(), 2);

        mounted.unmount();
        assert!(!mounted.is_mounted());

        tokio::time::sleep(Duration::from_secs(180)).await;
        assert_eq!(source.calls(), 2);

        mounted.unmount();
        assert!(!mounted.is_mounted());
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_fetching_after_drop() {
        let (mounted, source, _clock) = mount_at(1).await;
        drop(mounted);
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_timer_running_after_failed_mount() {
        let source = FakeSource::with_stats(sample_stats());
        source.fail_with("ERR");
        let clock = FixedClock::at(9, 1);
        let renderer = Arc::new(RecordingRenderer::default());
        let widget = make_widget(&source, &clock, &renderer);

        let mounted = MountedChart::mount(widget, TICK_PERIOD).await;
        assert!(mounted.is_mounted());
        assert!(mounted.widget().lock().await.stats().weekday_kwh.is_empty());

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(source.calls(), 2);
    }
}
