//! Data ingestion layer for the campus energy dashboard.
//!
//! Responsible for discovering and parsing per-building meter CSV files,
//! normalizing them into the unified dataset, computing daily/weekly
//! aggregates and summary statistics, and running the top-level analysis
//! pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use energy_core as core;
