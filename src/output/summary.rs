//! Run summary built from the reports of every crawl driver

use crate::crawler::DriverReport;
use chrono::{DateTime, Utc};

/// Summary statistics for a crawl run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    // Targets
    pub targets: usize,
    pub targets_exhausted: usize,
    /// Targets whose pagination ended on a listing failure
    pub failed_targets: Vec<String>,
    /// Driver tasks that panicked
    pub targets_aborted: usize,

    // Pages and profiles
    pub pages_fetched: u64,
    pub profiles_parsed: u64,
    pub profiles_failed: u64,
    pub duplicates: u64,

    // Output
    pub total_records: usize,
    pub final_flush_failed: bool,
}

impl RunSummary {
    /// Creates an empty summary for a run starting now
    pub fn new(targets: usize) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            targets,
            targets_exhausted: 0,
            failed_targets: Vec::new(),
            targets_aborted: 0,
            pages_fetched: 0,
            profiles_parsed: 0,
            profiles_failed: 0,
            duplicates: 0,
            total_records: 0,
            final_flush_failed: false,
        }
    }

    /// Adds the figures of one finished driver
    pub fn record(&mut self, report: &DriverReport) {
        self.pages_fetched += report.pages_fetched;
        self.profiles_parsed += report.profiles_parsed;
        self.profiles_failed += report.profiles_failed;
        self.duplicates += report.duplicates;

        if report.stop.is_error() {
            self.failed_targets.push(report.target.to_string());
        } else {
            self.targets_exhausted += 1;
        }
    }

    /// Stamps the finish time and final record count
    pub fn finish(&mut self, total_records: usize) {
        self.finished_at = Some(Utc::now());
        self.total_records = total_records;
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of attempted profiles that parsed, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.profiles_parsed + self.profiles_failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.profiles_parsed as f64 / attempted as f64) * 100.0
    }
}

/// Prints a run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Run:");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    if let Some(finished) = summary.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = summary.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Targets:");
    println!("  Total: {}", summary.targets);
    println!("  Exhausted: {}", summary.targets_exhausted);
    println!("  Listing failures: {}", summary.failed_targets.len());
    if summary.targets_aborted > 0 {
        println!("  Aborted: {}", summary.targets_aborted);
    }
    for target in &summary.failed_targets {
        println!("  - {}", target);
    }
    println!();

    println!("Profiles:");
    println!("  Listing pages fetched: {}", summary.pages_fetched);
    println!("  Parsed: {}", summary.profiles_parsed);
    println!("  Failed: {}", summary.profiles_failed);
    println!("  Duplicates skipped: {}", summary.duplicates);
    println!("  Success Rate: {:.1}%", summary.success_rate());
    println!();

    if summary.final_flush_failed {
        println!("Final flush FAILED; output holds the last checkpoint only");
    }
    println!("Total unique profiles scraped: {}", summary.total_records);
}
