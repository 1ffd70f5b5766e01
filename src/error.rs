use thiserror::Error;

/// Errors that end a translation run.
///
/// Transient translation failures never show up here; they are absorbed by the
/// per-cell retry loop. Only an exhausted retry budget escalates to
/// [`RunError::TranslationExhausted`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("column {column} is out of range (grid has {column_count} columns)")]
    ColumnOutOfRange { column: usize, column_count: usize },

    /// Cell coordinates are 1-based, matching the column selection.
    #[error("translation of cell (row {row}, column {column}) failed after {attempts} attempts: {source:#}")]
    TranslationExhausted {
        row: usize,
        column: usize,
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("translation task ended abnormally: {0}")]
    TaskAborted(String),

    #[error("output error: {0}")]
    Output(String),
}
