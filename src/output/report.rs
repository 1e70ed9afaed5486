//! Post-crawl report on a written output file

use crate::output::traits::{OutputError, OutputResult};
use std::collections::HashSet;
use std::path::Path;

/// Column counted by [`count_unique_emails`]
pub const EMAIL_COLUMN: &str = "Email";

/// Email statistics of an output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailReport {
    /// Data rows in the file, header excluded
    pub rows: usize,

    /// Distinct non-empty values in the Email column
    pub unique_emails: usize,
}

/// Counts the distinct email addresses of a CSV output file
///
/// The column is located by its header name. Empty cells are not counted.
pub fn count_unique_emails(path: &Path) -> OutputResult<EmailReport> {
    let mut reader = csv::Reader::from_path(path)?;

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == EMAIL_COLUMN)
        .ok_or_else(|| OutputError::MissingColumn(EMAIL_COLUMN.to_string()))?;

    let mut rows = 0;
    let mut emails = HashSet::new();
    for result in reader.records() {
        let row = result?;
        rows += 1;

        if let Some(email) = row.get(column).map(str::trim).filter(|e| !e.is_empty()) {
            emails.insert(email.to_string());
        }
    }

    Ok(EmailReport {
        rows,
        unique_emails: emails.len(),
    })
}
