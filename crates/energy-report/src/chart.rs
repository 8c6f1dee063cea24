//! Three-panel dashboard chart rendered with the [`plotters`] bitmap
//! backend.
//!
//! Panel 1: daily consumption trend lines per building. Panel 2: average
//! weekly consumption bars per building. Panel 3: peak hourly consumption
//! per building scattered over hour-of-day. Saved as one fixed-resolution
//! PNG.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use energy_core::error::{EnergyError, Result};
use energy_core::models::ConsumptionStats;
use energy_data::aggregator::WeeklyTotal;
use energy_data::analysis::AnalysisResult;
use plotters::coord::Shift;
use plotters::prelude::*;

const CHART_WIDTH: u32 = 1400;
const CHART_HEIGHT: u32 = 1800;

// ── Public API ────────────────────────────────────────────────────────────────

/// Render the dashboard to `path` as a PNG.
///
/// Empty input draws empty axes rather than failing.
pub fn render_dashboard(path: &Path, analysis: &AnalysisResult) -> Result<()> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let panels = root.split_evenly((3, 1));
    draw_daily_trend(&panels[0], analysis)?;
    draw_weekly_average(&panels[1], analysis)?;
    draw_peak_hours(&panels[2], analysis)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Mean weekly consumption per building, sorted by building name.
pub fn average_weekly_by_building(weekly: &[WeeklyTotal]) -> Vec<(String, f64)> {
    let mut stats: BTreeMap<String, ConsumptionStats> = BTreeMap::new();
    for total in weekly {
        stats
            .entry(total.building.clone())
            .or_default()
            .add(total.consumption);
    }
    stats
        .into_iter()
        .map(|(building, s)| (building, s.mean()))
        .collect()
}

/// Upper axis bound with 10% headroom; 1.0 for empty or non-positive data.
pub fn padded_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

// ── Panels ────────────────────────────────────────────────────────────────────

fn draw_err<E: std::fmt::Display>(e: E) -> EnergyError {
    EnergyError::Chart(e.to_string())
}

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn draw_daily_trend(area: &Panel<'_>, analysis: &AnalysisResult) -> Result<()> {
    let mut by_building: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for total in &analysis.daily {
        by_building
            .entry(total.building.as_str())
            .or_default()
            .push((total.date, total.consumption));
    }

    let fallback = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let start = analysis
        .daily
        .iter()
        .map(|d| d.date)
        .min()
        .unwrap_or(fallback);
    let end = analysis.daily.iter().map(|d| d.date).max().unwrap_or(start);
    // Dates are plotted as day offsets from the first date; labels map back.
    let span = (end - start).num_days().max(1);
    let y_max = padded_max(analysis.daily.iter().map(|d| d.consumption));

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Energy Consumption Trend", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0i64..span, 0f64..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("kWh")
        .x_label_formatter(&|offset| (start + Duration::days(*offset)).to_string())
        .draw()
        .map_err(draw_err)?;

    for (idx, (building, mut points)) in by_building.into_iter().enumerate() {
        points.sort_by_key(|(date, _)| *date);
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(
                points
                    .iter()
                    .map(|(date, kwh)| ((*date - start).num_days(), *kwh)),
                color.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(building)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

fn draw_weekly_average(area: &Panel<'_>, analysis: &AnalysisResult) -> Result<()> {
    let averages = average_weekly_by_building(&analysis.weekly);
    let names: Vec<String> = averages.iter().map(|(name, _)| name.clone()).collect();
    let n = averages.len().max(1) as i32;
    let y_max = padded_max(averages.iter().map(|(_, avg)| *avg));

    let mut chart = ChartBuilder::on(area)
        .caption("Average Weekly Energy Usage per Building", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Building")
        .y_desc("Average kWh")
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) => names
                .get(*i as usize)
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(averages.iter().enumerate().map(|(idx, (_, avg))| {
            let i = idx as i32;
            let color = Palette99::pick(idx).to_rgba();
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *avg),
                ],
                color.filled(),
            )
        }))
        .map_err(draw_err)?;
    Ok(())
}

fn draw_peak_hours(area: &Panel<'_>, analysis: &AnalysisResult) -> Result<()> {
    let mut by_building: BTreeMap<&str, Vec<(u32, f64)>> = BTreeMap::new();
    for point in &analysis.peak_hours {
        by_building
            .entry(point.building.as_str())
            .or_default()
            .push((point.hour, point.consumption));
    }

    let y_max = padded_max(analysis.peak_hours.iter().map(|p| p.consumption));

    let mut chart = ChartBuilder::on(area)
        .caption("Peak-Hour Consumption per Building", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0i32..24i32, 0f64..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Hour of Day")
        .y_desc("kWh")
        .draw()
        .map_err(draw_err)?;

    for (idx, (building, points)) in by_building.into_iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(
                points
                    .iter()
                    .map(|(hour, kwh)| Circle::new((*hour as i32, *kwh), 5, color.filled())),
            )
            .map_err(draw_err)?
            .label(building)
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn weekly(building: &str, day: u32, kwh: f64) -> WeeklyTotal {
        WeeklyTotal {
            building: building.to_string(),
            week_ending: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            consumption: kwh,
        }
    }

    #[test]
    fn test_average_weekly_by_building() {
        let totals = vec![
            weekly("A", 1, 10.0),
            weekly("A", 8, 30.0),
            weekly("B", 1, 5.0),
        ];
        let averages = average_weekly_by_building(&totals);
        assert_eq!(averages, vec![("A".to_string(), 20.0), ("B".to_string(), 5.0)]);
    }

    #[test]
    fn test_average_weekly_empty() {
        assert!(average_weekly_by_building(&[]).is_empty());
    }

    #[test]
    fn test_padded_max_adds_headroom() {
        let max = padded_max([10.0, 20.0].into_iter());
        assert!((max - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_padded_max_empty_is_one() {
        assert_eq!(padded_max(std::iter::empty()), 1.0);
    }

    #[test]
    fn test_padded_max_non_positive_is_one() {
        assert_eq!(padded_max([-5.0, 0.0].into_iter()), 1.0);
    }
}
