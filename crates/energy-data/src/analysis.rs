//! Top-level analysis pipeline for the campus energy dashboard.
//!
//! Runs every aggregate view over the unified dataset in one call and
//! returns an [`AnalysisResult`] ready for the chart and export layers.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use energy_core::models::{ConsumptionStats, MeterRecord};

use crate::aggregator::{DailyTotal, EnergyAggregator, PeakHourPoint, WeeklyTotal};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of meter records processed.
    pub records_processed: usize,
    /// Number of distinct buildings seen.
    pub buildings_seen: usize,
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Per-building daily totals.
    pub daily: Vec<DailyTotal>,
    /// Per-building weekly totals (buckets ending on Monday).
    pub weekly: Vec<WeeklyTotal>,
    /// Building → summary statistics.
    pub summaries: BTreeMap<String, ConsumptionStats>,
    /// Campus-wide calendar-date totals.
    pub campus_daily: BTreeMap<NaiveDate, f64>,
    /// Campus-wide ISO-week-number totals.
    pub campus_weekly: BTreeMap<u32, f64>,
    /// Per-(building, hour) maximum readings for the scatter panel.
    pub peak_hours: Vec<PeakHourPoint>,
    /// Grand total consumption in kWh.
    pub total_consumption: f64,
    /// Hour of day with the greatest summed consumption.
    pub peak_load_hour: Option<u32>,
    /// Building with the largest total.
    pub top_building: Option<String>,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Derive every aggregate view from the unified dataset.
///
/// Each view is a full recompute over `records`; there is no incremental
/// update path. Empty input produces empty collections and `None` scalars.
pub fn analyze(records: &[MeterRecord]) -> AnalysisResult {
    let summaries = EnergyAggregator::building_summaries(records);
    let top_building = EnergyAggregator::top_building(&summaries).map(str::to_string);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_processed: records.len(),
        buildings_seen: summaries.len(),
    };

    AnalysisResult {
        daily: EnergyAggregator::daily_totals(records),
        weekly: EnergyAggregator::weekly_totals(records),
        campus_daily: EnergyAggregator::campus_daily_totals(records),
        campus_weekly: EnergyAggregator::campus_weekly_totals(records),
        peak_hours: EnergyAggregator::peak_hours_by_building(records),
        total_consumption: EnergyAggregator::total_consumption(records),
        peak_load_hour: EnergyAggregator::peak_load_hour(records),
        top_building,
        summaries,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use energy_core::time_utils::parse_timestamp;

    fn record(building: &str, ts: &str, kwh: f64) -> MeterRecord {
        MeterRecord {
            timestamp: parse_timestamp(ts).unwrap(),
            consumption: kwh,
            building: building.to_string(),
            month: "2024-01".to_string(),
        }
    }

    #[test]
    fn test_analyze_end_to_end_example() {
        // Two files' worth of merged rows: A has 10 + 20, B has 5.
        let records = vec![
            record("A", "2024-01-01 08:00", 10.0),
            record("A", "2024-01-01 09:00", 20.0),
            record("B", "2024-01-01 08:00", 5.0),
        ];

        let analysis = analyze(&records);

        assert_eq!(analysis.metadata.records_processed, 3);
        assert_eq!(analysis.metadata.buildings_seen, 2);
        assert_eq!(analysis.total_consumption, 35.0);
        assert_eq!(analysis.top_building.as_deref(), Some("A"));
        // Hour 8 carries 15 kWh, hour 9 carries 20 kWh.
        assert_eq!(analysis.peak_load_hour, Some(9));

        let a = &analysis.summaries["A"];
        assert_eq!(a.total, 30.0);
        assert_eq!(a.mean(), 15.0);
        assert_eq!(a.min, 10.0);
        assert_eq!(a.max, 20.0);
    }

    #[test]
    fn test_analyze_empty_input_degrades_gracefully() {
        let analysis = analyze(&[]);
        assert!(analysis.daily.is_empty());
        assert!(analysis.weekly.is_empty());
        assert!(analysis.summaries.is_empty());
        assert!(analysis.campus_daily.is_empty());
        assert!(analysis.campus_weekly.is_empty());
        assert!(analysis.peak_hours.is_empty());
        assert_eq!(analysis.total_consumption, 0.0);
        assert_eq!(analysis.peak_load_hour, None);
        assert_eq!(analysis.top_building, None);
    }
}
