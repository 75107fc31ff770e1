use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Error type returned by loading, cleaning and writing.
///
/// Every variant is fatal for a run: the pipeline aborts and no output is written. Per-cell and
/// per-row anomalies (unparsable numbers, non-positive values, duplicates) never surface here;
/// stages resolve them locally and only report counts.
#[derive(Debug, Error)]
pub enum CleaningError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error (malformed input, ragged rows, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A stage needs a column that the table does not have.
    #[error("missing required column '{column}' (stage: {stage})")]
    MissingColumn { stage: &'static str, column: String },

    /// Two distinct source columns normalize to the same name.
    #[error("column name collision: {originals:?} all normalize to '{column}'")]
    ColumnCollision {
        column: String,
        originals: Vec<String>,
    },

    /// A row does not have one cell per schema column.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl CleaningError {
    pub(crate) fn missing_column(stage: &'static str, column: &str) -> Self {
        Self::MissingColumn {
            stage,
            column: column.to_owned(),
        }
    }
}
