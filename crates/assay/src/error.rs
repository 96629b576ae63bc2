//! Error types for the assay library.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file into a [`Table`](crate::input::Table).
///
/// This is the only failure the orchestrator recovers from: it is logged and
/// reported to the user, and the run ends without a report.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file is missing or could not be read.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library (bad quoting, invalid UTF-8, ...).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record does not line up with the header.
    #[error("Malformed input at line {line}: expected {expected} fields, found {found}")]
    Malformed {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Columns of different lengths were assembled into one table.
    #[error("Column '{column}' has {found} cells, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },

    /// No header or no columns to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),
}

/// Main error type for assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// The input could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Error writing an output file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error building the PDF document.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The log sink could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias for assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
