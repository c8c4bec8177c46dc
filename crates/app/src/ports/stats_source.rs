//! Stats source port: where the usage chart gets its numbers from.

use std::future::Future;

use kwhboard_domain::error::FetchError;
use kwhboard_domain::id::DeviceIdx;
use kwhboard_domain::stats::StatsResult;

/// Fetches aggregated energy statistics for a metering device.
///
/// Implementations unwrap the controller envelope: a non-`OK` status or a
/// malformed body must come back as a [`FetchError`], never as a partially
/// filled [`StatsResult`].
pub trait StatsSource: Send + Sync {
    /// Fetch the current statistics of `device`.
    fn fetch(
        &self,
        device: DeviceIdx,
    ) -> impl Future<Output = Result<StatsResult, FetchError>> + Send;
}

impl<T: StatsSource> StatsSource for std::sync::Arc<T> {
    fn fetch(
        &self,
        device: DeviceIdx,
    ) -> impl Future<Output = Result<StatsResult, FetchError>> + Send {
        (**self).fetch(device)
    }
}
