//! Crawler coordinator - main crawl orchestration logic
//!
//! This module starts one crawl driver per (place, category) pair, lets them
//! run concurrently over a shared HTTP client and accumulator, and writes the
//! final output once every driver has finished.

use crate::config::Config;
use crate::crawler::driver::CrawlDriver;
use crate::crawler::fetcher::build_http_client;
use crate::output::{CsvSink, RecordSink, RunSummary};
use crate::state::SharedAccumulator;
use crate::CrawlError;
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    base_url: Url,
    accumulator: SharedAccumulator,
}

impl Coordinator {
    /// Creates a coordinator writing to the configured CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - Invalid base URL or HTTP client failure
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let sink = Arc::new(CsvSink::new(&config.output.csv_path));
        Self::with_sink(config, sink)
    }

    /// Creates a coordinator writing to an arbitrary record sink
    pub fn with_sink(config: Config, sink: Arc<dyn RecordSink>) -> Result<Self, CrawlError> {
        let base_url = Url::parse(&config.site.base_url)?;
        let client = build_http_client(&config.site, &config.crawler)?;
        let accumulator = SharedAccumulator::new(config.crawler.checkpoint_interval, sink);

        Ok(Self {
            config: Arc::new(config),
            client,
            base_url,
            accumulator,
        })
    }

    /// The accumulator shared by this coordinator's drivers
    pub fn accumulator(&self) -> &SharedAccumulator {
        &self.accumulator
    }

    /// Runs every driver to completion and writes the final output
    ///
    /// Individual failures never abort the run; they are logged and counted
    /// in the returned summary.
    pub async fn run(&self) -> RunSummary {
        let targets = self.config.targets();
        let mut summary = RunSummary::new(targets.len());

        tracing::info!(
            "Starting crawl of {} targets ({} places x {} categories)",
            targets.len(),
            self.config.places.len(),
            self.config.categories.len()
        );

        let mut drivers = JoinSet::new();
        for target in targets {
            let driver = CrawlDriver::new(
                self.client.clone(),
                self.base_url.clone(),
                target,
                self.accumulator.clone(),
            );
            drivers.spawn(driver.run());
        }

        while let Some(joined) = drivers.join_next().await {
            match joined {
                Ok(report) => summary.record(&report),
                Err(e) => {
                    tracing::error!("Crawl driver aborted: {}", e);
                    summary.targets_aborted += 1;
                }
            }
        }

        if self.accumulator.is_empty() {
            tracing::warn!(
                "No profiles were scraped, {} will only hold the header",
                self.config.output.csv_path
            );
        }

        match self.accumulator.flush() {
            Ok(count) => tracing::info!(
                "Data saved to {}. Total unique profiles scraped: {}",
                self.config.output.csv_path,
                count
            ),
            Err(e) => {
                tracing::error!("Final flush failed: {}", e);
                summary.final_flush_failed = true;
            }
        }

        summary.finish(self.accumulator.len());
        summary
    }
}

/// Runs a complete crawl with the configured CSV output
///
/// # Example
///
/// ```no_run
/// use merocrawl::config::Config;
/// use merocrawl::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(Config::default()).await?;
/// println!("{} profiles", summary.total_records);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<RunSummary, CrawlError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
