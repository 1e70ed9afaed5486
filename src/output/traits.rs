//! Output handler traits and types
//!
//! This module defines the record sink interface and the errors shared by
//! every output operation.

use crate::model::ProfileRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Column '{0}' not found in output file")]
    MissingColumn(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for accumulated profile records
///
/// A flush always receives the complete record list, never a delta, and
/// replaces whatever an earlier flush wrote. Implementations must be
/// thread-safe since drivers checkpoint from different tasks.
pub trait RecordSink: Send + Sync {
    /// Writes `records`, in order, replacing any previous output
    fn flush(&self, records: &[ProfileRecord]) -> OutputResult<()>;
}
