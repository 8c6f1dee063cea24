//! Entity-oriented per-building accumulation of meter readings.
//!
//! The ledger is the second view over the same records the tabular
//! aggregator consumes: buildings are created lazily on their first
//! reading, readings are append-only, and reports come out of the shared
//! [`ConsumptionStats`] accumulator so both views always agree.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::models::{BuildingReport, ConsumptionStats, MeterReading};

// ── Building ──────────────────────────────────────────────────────────────────

/// One building's ordered list of meter readings.
#[derive(Debug, Clone)]
pub struct Building {
    name: String,
    meter_readings: Vec<MeterReading>,
}

impl Building {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meter_readings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn readings(&self) -> &[MeterReading] {
        &self.meter_readings
    }

    /// Append a reading. No validation: duplicate timestamps and negative
    /// kWh values are accepted as-is.
    pub fn add_reading(&mut self, reading: MeterReading) {
        self.meter_readings.push(reading);
    }

    /// Sum of all kWh readings for this building.
    pub fn total_consumption(&self) -> f64 {
        self.meter_readings.iter().map(|r| r.kwh).sum()
    }

    /// Summary report over all readings; all-zero for an empty building.
    pub fn generate_report(&self) -> BuildingReport {
        let mut stats = ConsumptionStats::default();
        for reading in &self.meter_readings {
            stats.add(reading.kwh);
        }
        BuildingReport::from_stats(self.name.clone(), &stats)
    }
}

// ── BuildingManager ───────────────────────────────────────────────────────────

/// The ledger: building name → readings, entries created lazily on first
/// reading. Iteration is in building-name order.
#[derive(Debug, Clone, Default)]
pub struct BuildingManager {
    buildings: BTreeMap<String, Building>,
}

impl BuildingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading to `building_name`, creating the building if it has
    /// not been seen before.
    pub fn add_reading(&mut self, building_name: &str, timestamp: NaiveDateTime, kwh: f64) {
        self.buildings
            .entry(building_name.to_string())
            .or_insert_with(|| Building::new(building_name))
            .add_reading(MeterReading::new(timestamp, kwh));
    }

    pub fn get(&self, building_name: &str) -> Option<&Building> {
        self.buildings.get(building_name)
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Reports for every known building, keyed and ordered by name.
    pub fn generate_all_reports(&self) -> BTreeMap<String, BuildingReport> {
        self.buildings
            .iter()
            .map(|(name, building)| (name.clone(), building.generate_report()))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    // ── Building ──────────────────────────────────────────────────────────────

    #[test]
    fn test_building_total_consumption() {
        let mut building = Building::new("Library");
        building.add_reading(MeterReading::new(ts(1, 8), 10.0));
        building.add_reading(MeterReading::new(ts(1, 9), 20.0));
        assert_eq!(building.total_consumption(), 30.0);
    }

    #[test]
    fn test_building_report_values() {
        let mut building = Building::new("Library");
        building.add_reading(MeterReading::new(ts(1, 8), 10.0));
        building.add_reading(MeterReading::new(ts(1, 9), 20.0));

        let report = building.generate_report();
        assert_eq!(report.building, "Library");
        assert_eq!(report.total_kwh, 30.0);
        assert_eq!(report.mean_kwh, 15.0);
        assert_eq!(report.min_kwh, 10.0);
        assert_eq!(report.max_kwh, 20.0);
        assert_eq!(report.total_readings, 2);
    }

    #[test]
    fn test_empty_building_report_is_all_zero() {
        let report = Building::new("Vacant").generate_report();
        assert_eq!(report.total_kwh, 0.0);
        assert_eq!(report.mean_kwh, 0.0);
        assert_eq!(report.min_kwh, 0.0);
        assert_eq!(report.max_kwh, 0.0);
        assert_eq!(report.total_readings, 0);
    }

    #[test]
    fn test_building_keeps_insertion_order() {
        let mut building = Building::new("Gym");
        building.add_reading(MeterReading::new(ts(2, 10), 5.0));
        building.add_reading(MeterReading::new(ts(1, 10), 7.0));
        // Readings are append-only; no reordering by timestamp.
        assert_eq!(building.readings()[0].kwh, 5.0);
        assert_eq!(building.readings()[1].kwh, 7.0);
    }

    // ── BuildingManager ───────────────────────────────────────────────────────

    #[test]
    fn test_manager_creates_buildings_lazily() {
        let mut manager = BuildingManager::new();
        assert!(manager.is_empty());

        manager.add_reading("Library", ts(1, 8), 10.0);
        manager.add_reading("Gym", ts(1, 8), 5.0);
        manager.add_reading("Library", ts(1, 9), 20.0);

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.get("Library").unwrap().readings().len(), 2);
        assert_eq!(manager.get("Gym").unwrap().readings().len(), 1);
    }

    #[test]
    fn test_manager_accepts_duplicates_and_negatives() {
        let mut manager = BuildingManager::new();
        manager.add_reading("Lab", ts(1, 8), -3.0);
        manager.add_reading("Lab", ts(1, 8), -3.0);

        let report = manager.get("Lab").unwrap().generate_report();
        assert_eq!(report.total_readings, 2);
        assert_eq!(report.total_kwh, -6.0);
    }

    #[test]
    fn test_generate_all_reports_sorted_by_name() {
        let mut manager = BuildingManager::new();
        manager.add_reading("Gym", ts(1, 8), 5.0);
        manager.add_reading("Annex", ts(1, 8), 1.0);
        manager.add_reading("Library", ts(1, 8), 10.0);

        let reports = manager.generate_all_reports();
        let names: Vec<&str> = reports.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Annex", "Gym", "Library"]);
    }
}
