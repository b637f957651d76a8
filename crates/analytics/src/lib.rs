//! # Evacuation Analytics
//!
//! Turns parsed simulation records into the numbers the reports show: per
//! condition summaries, per exit count series over agent counts, two-sample
//! significance tests, and mean evacuation curves.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: A stateless calculator over `SimulationRecord`s.
//! - `stats`: The numeric helpers (mean, standard deviation, t-tests).
//! - `ConditionSummary`, `ExitSeries`, `Comparison`, `CurvePoint`: Report types.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod curve;
pub mod engine;
pub mod error;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use core_types::TTestKind;
pub use curve::{mean_evacuation_curve, CurvePoint};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{Comparison, ConditionSummary, ExitSeries};
pub use stats::{mean, p_value, std_dev, t_test, variance, TTestResult};
