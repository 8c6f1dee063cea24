use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the export output directory exists (including missing parents).
pub fn ensure_output_dir(output_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber writing to `log_file`.
///
/// The file is opened in append mode so successive runs accumulate, giving
/// the timestamped INFO/ERROR per-file ingestion log. `log_level` accepts
/// the Python-style level names and falls back to `"info"` when
/// unrecognised.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => return setup_with_filter(other.to_lowercase().as_str(), log_file),
    };
    setup_with_filter(normalised, log_file)
}

fn setup_with_filter(directive: &str, log_file: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry().with(filter).with(layer).init();
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_output_dir_creates_nested_dirs() {
        let tmp = TempDir::new().expect("tempdir");
        let nested = tmp.path().join("reports").join("output");

        ensure_output_dir(&nested).expect("ensure_output_dir should succeed");
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_output_dir_idempotent() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = tmp.path().join("output");

        ensure_output_dir(&dir).unwrap();
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
