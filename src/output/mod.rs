//! Output module for persisting and reporting on crawl results
//!
//! This module handles:
//! - The `RecordSink` interface used for checkpoints and the final flush
//! - Writing records to CSV
//! - Summarising a finished run
//! - Reporting on a previously written output file

mod csv_sink;
pub mod report;
mod summary;
mod traits;

pub use csv_sink::CsvSink;
pub use report::{count_unique_emails, EmailReport};
pub use summary::{print_summary, RunSummary};
pub use traits::{OutputError, OutputResult, RecordSink};
