//! Core domain types for the campus energy dashboard.
//!
//! Holds the normalized meter record model, the shared consumption
//! statistics accumulator, the per-building ledger, the error type, CLI
//! settings and timestamp/bucketing helpers used by the ingestion and
//! reporting layers.

pub mod error;
pub mod ledger;
pub mod models;
pub mod settings;
pub mod time_utils;
