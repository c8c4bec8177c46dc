//! # kwhboard-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StatsSource`: fetch energy statistics for a device
//!   - `ChartRenderer`: hand chart definitions to the charting library
//!   - `Clock`: local wall-clock time
//!   - `FormField` / `Validator`: host form bindings
//! - Define **driving/inbound ports** as use-case structs:
//!   - `UsageChartWidget`: day selection, fetch, reshaping into chart series
//!   - `ParamForm`: validate / init / read of the hardware poll interval
//! - Provide **in-process infrastructure** that doesn't need IO (refresh
//!   timer, validator registry, system clock, in-memory text field)
//!
//! ## Dependency rule
//! Depends on `kwhboard-domain` only (plus `tokio` for the timer task).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod refresh;
pub mod services;
pub mod validators;
