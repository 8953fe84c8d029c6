use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type shared by the loader and the writer.
///
/// The run layer classifies these into a load-side or write-side outcome; no
/// variant ever escapes the top-level run function.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// CSV parse error (ragged rows, invalid UTF-8, unreadable file).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input could not produce a usable column layout (e.g. no header row).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Error from the embedded database (open, DDL, or insert).
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
