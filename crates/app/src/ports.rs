//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod chart_renderer;
pub mod clock;
pub mod form;
pub mod stats_source;

pub use chart_renderer::ChartRenderer;
pub use clock::{Clock, SystemClock};
pub use form::{FormField, TextField, Validator};
pub use stats_source::StatsSource;
