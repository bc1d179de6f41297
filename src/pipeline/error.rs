//! Error types for loading the trip and station extracts.
//!
//! Every variant is fatal: the dashboard has nothing to show without both
//! extracts, so callers surface the error and stop before rendering.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading an extract or the map asset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file does not exist.
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file extension is not one the loader can read.
    #[error("Unsupported file format: '{extension}' ({}). Supported formats: csv, parquet", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The file exists but could not be parsed as a table.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// A column used by the dashboard is absent from the header.
    #[error("Column '{column}' not found in {}. Available columns: {available:?}", path.display())]
    MissingColumn {
        path: PathBuf,
        column: String,
        available: Vec<String>,
    },

    /// A required cell is null or cannot be interpreted.
    #[error("Invalid value in column '{column}' at row {row} of {}: {message}", path.display())]
    InvalidValue {
        path: PathBuf,
        column: String,
        /// Zero-based data row (header excluded)
        row: usize,
        message: String,
    },

    /// Plain I/O failure, e.g. reading the map asset.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn invalid(
        path: &std::path::Path,
        column: &str,
        row: usize,
        message: impl Into<String>,
    ) -> Self {
        LoadError::InvalidValue {
            path: path.to_path_buf(),
            column: column.to_string(),
            row,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_not_found_display() {
        let err = LoadError::NotFound {
            path: PathBuf::from("trips.csv"),
        };
        assert_eq!(err.to_string(), "Input file not found: trips.csv");
    }

    #[test]
    fn test_missing_column_display() {
        let err = LoadError::MissingColumn {
            path: PathBuf::from("trips.csv"),
            column: "season".to_string(),
            available: vec!["usertype".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Column 'season' not found in trips.csv. Available columns: [\"usertype\"]"
        );
    }

    #[test]
    fn test_invalid_value_display() {
        let err = LoadError::invalid(Path::new("trips.csv"), "hour", 3, "24 is outside 0-23");
        assert_eq!(
            err.to_string(),
            "Invalid value in column 'hour' at row 3 of trips.csv: 24 is outside 0-23"
        );
    }

    #[test]
    fn test_io_error_source() {
        let err = LoadError::Io {
            path: PathBuf::from("map.html"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_not_found_has_no_source() {
        let err = LoadError::NotFound {
            path: PathBuf::from("x.csv"),
        };
        assert!(err.source().is_none());
    }
}
