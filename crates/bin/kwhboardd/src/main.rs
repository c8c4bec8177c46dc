//! # kwhboardd: energy usage chart daemon
//!
//! Composition root that wires the adapters together and keeps the usage
//! chart refreshed until interrupted.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars) and install logging
//! - Check the hardware poll interval through the parameter form
//! - Construct the stats client and chart renderer (adapters)
//! - Construct the usage chart widget, injecting adapters via port traits
//! - Mount the widget, wait for Ctrl-C, then unmount
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use anyhow::Context;
use kwhboard_adapter_chart_json::JsonFileRenderer;
use kwhboard_adapter_stats_reqwest::HttpStatsSource;
use kwhboard_app::ports::{FormField, SystemClock, TextField};
use kwhboard_app::refresh::MountedChart;
use kwhboard_app::services::param_form::ParamForm;
use kwhboard_app::services::usage_chart::UsageChartWidget;
use kwhboard_app::validators::Validators;
use kwhboard_domain::params::ParamRecord;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    let hardware = check_hardware(&config)?;
    tracing::info!(
        poll_interval_secs = hardware.poll_interval().as_secs(),
        "hardware parameters accepted"
    );

    // Adapters
    let source = HttpStatsSource::new(&config.stats.client).context("invalid stats client")?;
    let renderer = JsonFileRenderer::new(&config.chart.output_dir);

    // Widget
    let labels = config.weekday_labels()?;
    let widget = UsageChartWidget::new(
        config.stats.device_idx,
        source,
        SystemClock,
        renderer,
        &config.theme,
        labels,
    );

    tracing::info!(
        device = %config.stats.device_idx,
        controller = %config.stats.client.base_url,
        output = %config.chart.output_dir.display(),
        "kwhboardd starting"
    );
    let mut mounted = MountedChart::mount(widget, config.refresh_interval()).await;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("shutting down");
    mounted.unmount();
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter '{filter}': {err}, falling back to 'info'");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Run the configured poll interval through the parameter form.
fn check_hardware(config: &Config) -> anyhow::Result<ParamRecord> {
    let mut form = ParamForm::new(TextField::default());
    form.init(&config.hardware_params());
    form.read(&Validators::default())
        .with_context(|| format!("hardware.poll_interval '{}' rejected", form.field().value()))
}
