//! Domain models shared across the energy crates.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ── MeterRecord ───────────────────────────────────────────────────────────────

/// One normalized meter reading row from the unified dataset.
///
/// Invariant: `timestamp` and `consumption` are always present — files
/// missing either column are rejected whole at the ingestion boundary.
/// `building` defaults to the source file's stem and `month` to the current
/// processing month (`YYYY-MM`) when the columns are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Consumption")]
    pub consumption: f64,
    #[serde(rename = "Building")]
    pub building: String,
    #[serde(rename = "Month")]
    pub month: String,
}

// ── MeterReading ──────────────────────────────────────────────────────────────

/// An immutable (timestamp, kwh) pair held by the building ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterReading {
    pub timestamp: NaiveDateTime,
    pub kwh: f64,
}

impl MeterReading {
    pub fn new(timestamp: NaiveDateTime, kwh: f64) -> Self {
        Self { timestamp, kwh }
    }
}

// ── ConsumptionStats ──────────────────────────────────────────────────────────

/// Running total/min/max/count over a stream of consumption values.
///
/// The single canonical statistics accumulator: both the tabular building
/// summaries and the ledger reports derive their numbers from it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConsumptionStats {
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub count: u64,
}

impl ConsumptionStats {
    /// Fold one consumption value into the running stats.
    pub fn add(&mut self, kwh: f64) {
        if self.count == 0 {
            self.min = kwh;
            self.max = kwh;
        } else {
            self.min = self.min.min(kwh);
            self.max = self.max.max(kwh);
        }
        self.total += kwh;
        self.count += 1;
    }

    /// Arithmetic mean; 0 when no values have been added.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

// ── BuildingReport ────────────────────────────────────────────────────────────

/// Per-building summary row as exported to `building_summary.csv`.
///
/// All kWh fields are 0 for a building with no readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingReport {
    #[serde(rename = "Building")]
    pub building: String,
    #[serde(rename = "Total_kWh")]
    pub total_kwh: f64,
    #[serde(rename = "Mean_kWh")]
    pub mean_kwh: f64,
    #[serde(rename = "Min_kWh")]
    pub min_kwh: f64,
    #[serde(rename = "Max_kWh")]
    pub max_kwh: f64,
    #[serde(rename = "Total_Readings")]
    pub total_readings: u64,
}

impl BuildingReport {
    /// Build a report for `building` from the shared stats accumulator.
    pub fn from_stats(building: impl Into<String>, stats: &ConsumptionStats) -> Self {
        Self {
            building: building.into(),
            total_kwh: stats.total,
            mean_kwh: stats.mean(),
            min_kwh: if stats.is_empty() { 0.0 } else { stats.min },
            max_kwh: if stats.is_empty() { 0.0 } else { stats.max },
            total_readings: stats.count,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_add_tracks_min_max_total() {
        let mut stats = ConsumptionStats::default();
        stats.add(10.0);
        stats.add(20.0);
        stats.add(5.0);

        assert_eq!(stats.total, 35.0);
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 20.0);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_stats_mean() {
        let mut stats = ConsumptionStats::default();
        stats.add(10.0);
        stats.add(20.0);
        assert_eq!(stats.mean(), 15.0);
    }

    #[test]
    fn test_stats_empty_mean_is_zero() {
        let stats = ConsumptionStats::default();
        assert_eq!(stats.mean(), 0.0);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_stats_negative_values_accepted() {
        // The ledger accepts readings as-is, negatives included.
        let mut stats = ConsumptionStats::default();
        stats.add(-5.0);
        stats.add(5.0);
        assert_eq!(stats.min, -5.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.total, 0.0);
    }

    #[test]
    fn test_report_from_stats() {
        let mut stats = ConsumptionStats::default();
        stats.add(10.0);
        stats.add(20.0);

        let report = BuildingReport::from_stats("Library", &stats);
        assert_eq!(report.building, "Library");
        assert_eq!(report.total_kwh, 30.0);
        assert_eq!(report.mean_kwh, 15.0);
        assert_eq!(report.min_kwh, 10.0);
        assert_eq!(report.max_kwh, 20.0);
        assert_eq!(report.total_readings, 2);
    }

    #[test]
    fn test_report_from_empty_stats_is_all_zero() {
        let report = BuildingReport::from_stats("Empty", &ConsumptionStats::default());
        assert_eq!(report.total_kwh, 0.0);
        assert_eq!(report.mean_kwh, 0.0);
        assert_eq!(report.min_kwh, 0.0);
        assert_eq!(report.max_kwh, 0.0);
        assert_eq!(report.total_readings, 0);
    }
}
