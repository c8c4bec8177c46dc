//! # kwhboard-domain
//!
//! Pure domain model for the kwhboard energy dashboard.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers, error conventions, wall-clock helpers
//! - Define the **stats payload** returned by the home-automation controller
//! - Define the **view state** of the usage chart (selected day, refresh hour)
//! - Define the **chart definitions** handed to the charting library, and the
//!   theme they are built from
//! - Define the **hardware parameter record** and its bounds
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod chart;
pub mod params;
pub mod stats;
pub mod theme;
pub mod view;
