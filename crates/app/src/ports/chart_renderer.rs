//! Chart renderer port: the charting library owns drawing, we own the data.

use kwhboard_domain::chart::ChartSet;

/// Receives the declarative chart definitions after every state change.
///
/// Nothing flows back: rendering failures are the renderer's business.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, charts: &ChartSet);
}

impl<T: ChartRenderer> ChartRenderer for std::sync::Arc<T> {
    fn render(&self, charts: &ChartSet) {
        (**self).render(charts);
    }
}
