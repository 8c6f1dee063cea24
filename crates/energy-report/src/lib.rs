//! Reporting layer for the campus energy dashboard.
//!
//! Thin consumers of the pipeline's output: CSV/text exports of the unified
//! dataset and its summaries, and the three-panel [`plotters`] dashboard
//! chart.

pub mod chart;
pub mod export;

pub use energy_core as core;
pub use energy_data as data;
