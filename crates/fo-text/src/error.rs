//! Error types for delimited text ingestion and emission

use std::path::PathBuf;

use fo_core::DataError;
use thiserror::Error;

/// Errors raised while reading or writing delimited text
#[derive(Debug, Error)]
pub enum TextError {
    /// Failed to open or create a file.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited input or a failed write.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A record has more fields than the table has columns.
    #[error("record {record} has {actual} fields, expected at most {expected}")]
    RowTooWide {
        record: u64,
        expected: usize,
        actual: usize,
    },

    /// The delimiter is not a single byte.
    #[error("delimiter {0:?} is not a single-byte character")]
    InvalidDelimiter(char),

    /// A table operation failed.
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Result type for text operations.
pub type Result<T> = std::result::Result<T, TextError>;
