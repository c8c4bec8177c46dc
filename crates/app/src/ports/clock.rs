//! Clock port: local wall-clock time for weekday and refresh decisions.

use kwhboard_domain::time::{self, LocalTime};

/// Source of local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> LocalTime;
}

/// [`Clock`] backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> LocalTime {
        time::now()
    }
}

impl<T: Clock> Clock for std::sync::Arc<T> {
    fn now(&self) -> LocalTime {
        (**self).now()
    }
}
