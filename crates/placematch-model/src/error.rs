use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Cutoff outside `[0, 1]` or not a finite number.
    #[error("cutoff must be a finite value in [0, 1], got {0}")]
    InvalidCutoff(f64),

    /// Column not present in a dataset.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Row with a different number of cells than the dataset has columns.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
