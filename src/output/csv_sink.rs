//! CSV record sink

use crate::model::{ProfileRecord, RECORD_HEADERS};
use crate::output::traits::{OutputResult, RecordSink};
use std::path::{Path, PathBuf};

/// Writes the full record list to a CSV file on every flush
///
/// The file is truncated each time, so after a flush it holds exactly the
/// records passed in, preceded by a header row.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn flush(&self, records: &[ProfileRecord]) -> OutputResult<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        // Written explicitly so an empty run still produces a header
        wtr.write_record(RECORD_HEADERS)?;
        for record in records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;

        tracing::info!("Saved {} profiles to {}", records.len(), self.path.display());
        Ok(())
    }
}
