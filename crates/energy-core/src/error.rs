use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the energy dashboard.
#[derive(Error, Debug)]
pub enum EnergyError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be tokenized as CSV at all.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A file parsed but lacks a required column after header normalization.
    #[error("'{column}' column missing in {file}")]
    MissingColumn { column: &'static str, file: String },

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// The input data directory does not exist or is not a directory.
    #[error("Data directory not found: {0}")]
    DataDirNotFound(PathBuf),

    /// An error raised while rendering the dashboard chart.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the energy crates.
pub type Result<T> = std::result::Result<T, EnergyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = EnergyError::FileRead {
            path: PathBuf::from("/data/library.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/library.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = EnergyError::MissingColumn {
            column: "Timestamp",
            file: "gym.csv".to_string(),
        };
        assert_eq!(err.to_string(), "'Timestamp' column missing in gym.csv");
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = EnergyError::TimestampParse("not-a-timestamp".to_string());
        assert_eq!(err.to_string(), "Invalid timestamp format: not-a-timestamp");
    }

    #[test]
    fn test_error_display_data_dir_not_found() {
        let err = EnergyError::DataDirNotFound(PathBuf::from("/missing/data"));
        assert_eq!(err.to_string(), "Data directory not found: /missing/data");
    }

    #[test]
    fn test_error_display_chart() {
        let err = EnergyError::Chart("backend failure".to_string());
        assert_eq!(err.to_string(), "Chart rendering failed: backend failure");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: EnergyError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
