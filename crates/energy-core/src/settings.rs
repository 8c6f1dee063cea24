use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Campus electricity-meter ingestion, aggregation and reporting
#[derive(Parser, Debug, Clone)]
#[command(
    name = "energy-dashboard",
    about = "Merge per-building meter CSVs, aggregate and export reports",
    version
)]
pub struct Settings {
    /// Directory containing the per-building `*.csv` meter files
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory the CSV/text reports are written to
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Path of the rendered dashboard image
    #[arg(long, default_value = "dashboard.png")]
    pub chart_file: PathBuf,

    /// Append-mode ingestion log file
    #[arg(long, default_value = "data_ingestion.log")]
    pub log_file: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Number of merged rows shown in the diagnostic preview
    #[arg(long, default_value = "5")]
    pub preview_rows: usize,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
