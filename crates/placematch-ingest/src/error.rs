//! Error types for dataset ingestion.

use std::path::PathBuf;

use placematch_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading or writing datasets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File starts with a byte order mark of an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}, convert the file to UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV writer failure.
    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row contains no usable column names.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Header row contains a blank column name.
    #[error("blank column name in header of {path}")]
    EmptyColumnName { path: PathBuf },

    // === Dataset Errors ===
    /// Required column not found in a file.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Column not found in an in-memory dataset.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Dataset shape error.
    #[error(transparent)]
    Model(ModelError),
}

impl From<ModelError> for IngestError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ColumnNotFound { column } => Self::ColumnNotFound { column },
            other => Self::Model(other),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/cases.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/cases.csv");
    }

    #[test]
    fn test_error_from_model() {
        let err: IngestError = ModelError::ColumnNotFound {
            column: "county".to_string(),
        }
        .into();
        assert!(matches!(err, IngestError::ColumnNotFound { ref column } if column == "county"));

        let err: IngestError = ModelError::InvalidCutoff(2.0).into();
        assert!(matches!(err, IngestError::Model(_)));
    }
}
