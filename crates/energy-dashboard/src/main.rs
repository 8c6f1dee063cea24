mod bootstrap;

use anyhow::Result;
use clap::Parser;
use energy_core::ledger::BuildingManager;
use energy_core::settings::Settings;
use energy_data::analysis::analyze;
use energy_data::reader::load_meter_records;
use energy_report::{chart, export};

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::ensure_output_dir(&settings.output_dir)?;
    bootstrap::setup_logging(&settings.log_level, &settings.log_file)?;

    tracing::info!("Energy dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Ingest ────────────────────────────────────────────────────────
    let ingest = load_meter_records(&settings.data_dir)?;

    println!("Merged dataset preview:");
    for record in ingest.head(settings.preview_rows) {
        println!(
            "{}  {:10.2}  {}  {}",
            record.timestamp, record.consumption, record.building, record.month
        );
    }
    println!("Total rows merged: {}", ingest.records.len());
    tracing::info!(
        "Data ingestion completed successfully ({} files loaded, {} rejected)",
        ingest.files_loaded,
        ingest.files_rejected
    );

    // ── Step 2: Aggregate ─────────────────────────────────────────────────────
    let analysis = analyze(&ingest.records);

    println!("\nBuilding-wise Summary:");
    for (building, stats) in &analysis.summaries {
        println!(
            "{}: Total {:.2}, Mean {:.2}, Min {:.2}, Max {:.2}",
            building,
            stats.total,
            stats.mean(),
            stats.min,
            stats.max
        );
    }

    // ── Step 3: Ledger replay ─────────────────────────────────────────────────
    let mut manager = BuildingManager::new();
    for record in &ingest.records {
        manager.add_reading(&record.building, record.timestamp, record.consumption);
    }
    let reports = manager.generate_all_reports();

    for report in reports.values() {
        println!(
            "{}: {:.2} kWh over {} readings",
            report.building, report.total_kwh, report.total_readings
        );
    }

    // ── Step 4: Chart ─────────────────────────────────────────────────────────
    chart::render_dashboard(&settings.chart_file, &analysis)?;
    println!("Dashboard saved to: {}", settings.chart_file.display());

    // ── Step 5: Exports ───────────────────────────────────────────────────────
    let paths = export::export_all(&settings.output_dir, &ingest.records, &reports, &analysis)?;
    for path in &paths {
        println!("Exported: {}", path.display());
    }

    tracing::info!("Run complete: {} artifacts written", paths.len());
    Ok(())
}
