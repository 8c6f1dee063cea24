//! CSV file discovery and ingestion for the campus energy dashboard.
//!
//! Scans a directory for per-building meter CSV files and merges them into
//! the unified dataset with per-file fault isolation: a file that fails to
//! parse or lacks a required column is discarded whole and logged, and the
//! scan moves on to the next file.

use std::fs::File;
use std::path::{Path, PathBuf};

use energy_core::error::{EnergyError, Result};
use energy_core::models::MeterRecord;
use energy_core::time_utils::{current_month_key, parse_timestamp};
use tracing::{debug, error, info};

// ── Public API ────────────────────────────────────────────────────────────────

/// Outcome of one ingestion scan over a data directory.
#[derive(Debug, Clone, Default)]
pub struct IngestResult {
    /// The unified dataset: every accepted file's rows in scan order.
    pub records: Vec<MeterRecord>,
    /// Number of files that were parsed and merged.
    pub files_loaded: usize,
    /// Number of files discarded with a logged error.
    pub files_rejected: usize,
}

impl IngestResult {
    /// First `n` merged rows, for the diagnostic preview.
    pub fn head(&self, n: usize) -> &[MeterRecord] {
        &self.records[..self.records.len().min(n)]
    }
}

/// Find all `.csv` files directly inside `data_path` (non-recursive),
/// sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Scan `data_dir` and build the unified dataset.
///
/// Per file: parse → normalize → merge. Any per-file failure (unreadable,
/// untokenizable, missing required column) is logged at error level with the
/// file name and reason, and the scan continues. The only aborting condition
/// is a missing or unreadable data directory.
pub fn load_meter_records(data_dir: &Path) -> Result<IngestResult> {
    if !data_dir.is_dir() {
        return Err(EnergyError::DataDirNotFound(data_dir.to_path_buf()));
    }

    let mut result = IngestResult::default();

    for file_path in find_csv_files(data_dir) {
        let name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());

        match process_single_file(&file_path) {
            Ok(rows) => {
                result.records.extend(rows);
                result.files_loaded += 1;
                info!("Successfully loaded: {}", name);
            }
            Err(e) => {
                result.files_rejected += 1;
                error!("Error with {}: {}", name, e);
            }
        }
    }

    Ok(result)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Trim and title-case a raw header, so `" consumption "` and
/// `"CONSUMPTION"` both validate as `Consumption`.
fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alphabetic = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}

/// Position of `column` among the normalized headers.
fn column_index(headers: &[String], column: &str) -> Option<usize> {
    headers.iter().position(|h| h == column)
}

/// Parse and normalize one CSV file into meter records.
///
/// Fails whole-file when the file cannot be read or tokenized, or when
/// `Timestamp` or `Consumption` is absent after header normalization.
/// Individual rows with missing fields or unparseable values are skipped
/// silently (debug log only).
fn process_single_file(file_path: &Path) -> Result<Vec<MeterRecord>> {
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = File::open(file_path).map_err(|source| EnergyError::FileRead {
        path: file_path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers: Vec<String> = rdr.headers()?.iter().map(normalize_header).collect();

    let ts_idx = column_index(&headers, "Timestamp").ok_or(EnergyError::MissingColumn {
        column: "Timestamp",
        file: file_name.clone(),
    })?;
    let kwh_idx = column_index(&headers, "Consumption").ok_or(EnergyError::MissingColumn {
        column: "Consumption",
        file: file_name.clone(),
    })?;
    let building_idx = column_index(&headers, "Building");
    let month_idx = column_index(&headers, "Month");

    // Month backfill uses the current processing month, not the record's
    // own timestamp. See DESIGN.md.
    let default_month = current_month_key();

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                debug!("Skipping malformed line in {}: {}", file_name, e);
                continue;
            }
        };

        let timestamp = match row.get(ts_idx).and_then(parse_timestamp) {
            Some(ts) => ts,
            None => {
                debug!("Skipping row with bad timestamp in {}", file_name);
                continue;
            }
        };

        let consumption = match row.get(kwh_idx).and_then(|v| v.trim().parse::<f64>().ok()) {
            Some(kwh) => kwh,
            None => {
                debug!("Skipping row with bad consumption in {}", file_name);
                continue;
            }
        };

        let building = building_idx
            .and_then(|i| row.get(i))
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| file_stem.clone());

        let month = month_idx
            .and_then(|i| row.get(i))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default_month.clone());

        records.push(MeterRecord {
            timestamp,
            consumption,
            building,
            month,
        });
    }

    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
