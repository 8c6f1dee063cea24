//! CSV and text exports of the unified dataset and its summaries.
//!
//! All artifacts land under one output directory:
//! `cleaned_energy_data.csv`, `building_summary.csv`, `daily_totals.csv`,
//! `weekly_totals.csv`, `summary.txt` and the `test.txt` sentinel.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use energy_core::error::Result;
use energy_core::models::{BuildingReport, MeterRecord};
use energy_data::analysis::AnalysisResult;
use tracing::info;

/// Fixed contents of the `test.txt` sentinel artifact.
const SENTINEL_TEXT: &str = "Hello, this is a test!";

// ── Individual artifacts ──────────────────────────────────────────────────────

/// Write the full unified dataset to `cleaned_energy_data.csv`.
pub fn write_cleaned_data(output_dir: &Path, records: &[MeterRecord]) -> Result<PathBuf> {
    let path = output_dir.join("cleaned_energy_data.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(path)
}

/// Write one row per building to `building_summary.csv`.
///
/// Header casing is `Total_kWh` throughout; see DESIGN.md.
pub fn write_building_summary(
    output_dir: &Path,
    reports: &BTreeMap<String, BuildingReport>,
) -> Result<PathBuf> {
    let path = output_dir.join("building_summary.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    for report in reports.values() {
        wtr.serialize(report)?;
    }
    wtr.flush()?;
    Ok(path)
}

/// Write campus-wide calendar-date totals to `daily_totals.csv`.
pub fn write_daily_totals(
    output_dir: &Path,
    campus_daily: &BTreeMap<NaiveDate, f64>,
) -> Result<PathBuf> {
    let path = output_dir.join("daily_totals.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(["Date", "Daily_Consumption"])?;
    for (date, total) in campus_daily {
        wtr.write_record([date.to_string(), total.to_string()])?;
    }
    wtr.flush()?;
    Ok(path)
}

/// Write campus-wide ISO-week totals to `weekly_totals.csv`.
pub fn write_weekly_totals(
    output_dir: &Path,
    campus_weekly: &BTreeMap<u32, f64>,
) -> Result<PathBuf> {
    let path = output_dir.join("weekly_totals.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(["Week", "Weekly_Consumption"])?;
    for (week, total) in campus_weekly {
        wtr.write_record([week.to_string(), total.to_string()])?;
    }
    wtr.flush()?;
    Ok(path)
}

/// Write the human-readable executive summary to `summary.txt`.
pub fn write_summary_text(output_dir: &Path, analysis: &AnalysisResult) -> Result<PathBuf> {
    let path = output_dir.join("summary.txt");
    std::fs::write(&path, render_summary_text(output_dir, analysis))?;
    Ok(path)
}

/// Build the executive summary body.
pub fn render_summary_text(output_dir: &Path, analysis: &AnalysisResult) -> String {
    let top_building = analysis.top_building.as_deref().unwrap_or("N/A");
    let peak_hour = analysis
        .peak_load_hour
        .map(|h| format!("{}:00", h))
        .unwrap_or_else(|| "N/A".to_string());

    let mut text = String::new();
    let _ = writeln!(text, "Campus Energy Executive Summary");
    let _ = writeln!(text, "-----------------------------------");
    let _ = writeln!(
        text,
        "Total Campus Consumption: {:.2} kWh",
        analysis.total_consumption
    );
    let _ = writeln!(text, "Highest Consuming Building: {}", top_building);
    let _ = writeln!(text, "Peak Load Hour: {}", peak_hour);

    let _ = writeln!(text, "\nDaily Consumption Trends:");
    for (date, total) in &analysis.campus_daily {
        let _ = writeln!(text, "{}: {:.2} kWh", date, total);
    }

    let _ = writeln!(text, "\nWeekly Consumption Trends:");
    for (week, total) in &analysis.campus_weekly {
        let _ = writeln!(text, "Week {}: {:.2} kWh", week, total);
    }

    let _ = write!(
        text,
        "\nDetailed CSV summaries saved in the '{}' folder.",
        output_dir.display()
    );
    text
}

/// Write the fixed `test.txt` sentinel (diagnostic artifact).
pub fn write_sentinel(output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join("test.txt");
    std::fs::write(&path, SENTINEL_TEXT)?;
    Ok(path)
}

// ── Bundle ────────────────────────────────────────────────────────────────────

/// Write every export artifact under `output_dir`, creating it if absent.
///
/// Returns the written paths in a fixed order: cleaned data, building
/// summary, daily totals, weekly totals, summary text, sentinel.
pub fn export_all(
    output_dir: &Path,
    records: &[MeterRecord],
    reports: &BTreeMap<String, BuildingReport>,
    analysis: &AnalysisResult,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let paths = vec![
        write_cleaned_data(output_dir, records)?,
        write_building_summary(output_dir, reports)?,
        write_daily_totals(output_dir, &analysis.campus_daily)?,
        write_weekly_totals(output_dir, &analysis.campus_weekly)?,
        write_summary_text(output_dir, analysis)?,
        write_sentinel(output_dir)?,
    ];

    for path in &paths {
        info!("Exported {}", path.display());
    }
    Ok(paths)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
