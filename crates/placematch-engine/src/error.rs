//! Error types for the matching engine.

use std::path::PathBuf;

use placematch_model::ModelError;
use thiserror::Error;

/// Errors from matching, reconciliation and mapping-table I/O.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid options or dataset shape.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Failed to open a mapping or override table.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Malformed CSV content.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required header missing from a mapping or override table.
    #[error("required column '{column}' not found in mapping table")]
    MissingHeader { column: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
