//! Aggregation over the unified meter dataset.
//!
//! Daily and weekly resampling per building, building summary statistics,
//! campus-wide series and the executive scalar results. All groupings use
//! `BTreeMap` so output ordering is sorted and deterministic.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};
use energy_core::models::{ConsumptionStats, MeterRecord};
use energy_core::time_utils::{iso_week, week_ending_monday};

// ── Bucketed totals ───────────────────────────────────────────────────────────

/// Consumption summed over one (building, calendar day) bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub building: String,
    pub date: NaiveDate,
    pub consumption: f64,
}

/// Consumption summed over one (building, week) bucket.
///
/// `week_ending` is the Monday that closes the bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTotal {
    pub building: String,
    pub week_ending: NaiveDate,
    pub consumption: f64,
}

/// Largest single reading seen for one (building, hour-of-day) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakHourPoint {
    pub building: String,
    pub hour: u32,
    pub consumption: f64,
}

// ── EnergyAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that derives all aggregate views from a record slice.
pub struct EnergyAggregator;

impl EnergyAggregator {
    /// Per-building daily totals, sorted by (building, date).
    pub fn daily_totals(records: &[MeterRecord]) -> Vec<DailyTotal> {
        let mut map: BTreeMap<(String, NaiveDate), f64> = BTreeMap::new();
        for record in records {
            *map.entry((record.building.clone(), record.timestamp.date()))
                .or_default() += record.consumption;
        }
        map.into_iter()
            .map(|((building, date), consumption)| DailyTotal {
                building,
                date,
                consumption,
            })
            .collect()
    }

    /// Per-building weekly totals, buckets ending on Monday, sorted by
    /// (building, week label).
    pub fn weekly_totals(records: &[MeterRecord]) -> Vec<WeeklyTotal> {
        let mut map: BTreeMap<(String, NaiveDate), f64> = BTreeMap::new();
        for record in records {
            let label = week_ending_monday(record.timestamp.date());
            *map.entry((record.building.clone(), label)).or_default() += record.consumption;
        }
        map.into_iter()
            .map(|((building, week_ending), consumption)| WeeklyTotal {
                building,
                week_ending,
                consumption,
            })
            .collect()
    }

    /// Building → total/mean/min/max stats over all of its records.
    pub fn building_summaries(records: &[MeterRecord]) -> BTreeMap<String, ConsumptionStats> {
        let mut map: BTreeMap<String, ConsumptionStats> = BTreeMap::new();
        for record in records {
            map.entry(record.building.clone())
                .or_default()
                .add(record.consumption);
        }
        map
    }

    /// Campus-wide calendar-date totals.
    pub fn campus_daily_totals(records: &[MeterRecord]) -> BTreeMap<NaiveDate, f64> {
        let mut map: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            *map.entry(record.timestamp.date()).or_default() += record.consumption;
        }
        map
    }

    /// Campus-wide ISO-week-number totals.
    pub fn campus_weekly_totals(records: &[MeterRecord]) -> BTreeMap<u32, f64> {
        let mut map: BTreeMap<u32, f64> = BTreeMap::new();
        for record in records {
            *map.entry(iso_week(record.timestamp.date())).or_default() += record.consumption;
        }
        map
    }

    /// Grand total consumption across every record.
    pub fn total_consumption(records: &[MeterRecord]) -> f64 {
        records.iter().map(|r| r.consumption).sum()
    }

    /// Hour of day (0–23) with the greatest summed consumption.
    ///
    /// Ties break to the first hour in ascending order. `None` on empty
    /// input.
    pub fn peak_load_hour(records: &[MeterRecord]) -> Option<u32> {
        let mut by_hour: BTreeMap<u32, f64> = BTreeMap::new();
        for record in records {
            *by_hour.entry(record.timestamp.hour()).or_default() += record.consumption;
        }

        let mut best: Option<(u32, f64)> = None;
        for (hour, total) in by_hour {
            match best {
                Some((_, best_total)) if total <= best_total => {}
                _ => best = Some((hour, total)),
            }
        }
        best.map(|(hour, _)| hour)
    }

    /// Building with the largest summary total; `None` when `summaries` is
    /// empty. Ties break to the first name in ascending order.
    pub fn top_building(summaries: &BTreeMap<String, ConsumptionStats>) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, stats) in summaries {
            match best {
                Some((_, best_total)) if stats.total <= best_total => {}
                _ => best = Some((name.as_str(), stats.total)),
            }
        }
        best.map(|(name, _)| name)
    }

    /// Maximum single reading per (building, hour-of-day), for the
    /// peak-hour scatter panel. Hours come from the records' own
    /// timestamps, not from resampled buckets.
    pub fn peak_hours_by_building(records: &[MeterRecord]) -> Vec<PeakHourPoint> {
        let mut map: BTreeMap<(String, u32), f64> = BTreeMap::new();
        for record in records {
            let key = (record.building.clone(), record.timestamp.hour());
            map.entry(key)
                .and_modify(|peak| *peak = peak.max(record.consumption))
                .or_insert(record.consumption);
        }
        map.into_iter()
            .map(|((building, hour), consumption)| PeakHourPoint {
                building,
                hour,
                consumption,
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
