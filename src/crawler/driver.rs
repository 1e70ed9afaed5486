//! Crawl driver for a single place and category
//!
//! A driver walks the listing pages of its target one at a time. For each
//! page that still lists profiles it fetches every linked profile
//! concurrently, commits the parsed records to the shared accumulator and
//! moves on to the next page. The first page without profiles, or the first
//! listing failure, ends the walk.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::listing::parse_listing;
use crate::crawler::profile::parse_profile;
use crate::model::{CrawlTarget, ProfileLink, ProfileRecord};
use crate::state::{DriverState, SharedAccumulator, StopReason};
use crate::CrawlError;
use futures::future::join_all;
use reqwest::Client;
use url::Url;

/// What one driver did before it stopped
#[derive(Debug, Clone)]
pub struct DriverReport {
    pub target: CrawlTarget,

    /// Listing pages fetched successfully, including the final empty one
    pub pages_fetched: u64,

    pub profiles_parsed: u64,
    pub profiles_failed: u64,

    /// Parsed records that were new to the accumulator
    pub records_added: u64,

    /// Parsed records already present in the accumulator
    pub duplicates: u64,

    pub stop: StopReason,
}

impl DriverReport {
    pub fn new(target: CrawlTarget) -> Self {
        Self {
            target,
            pages_fetched: 0,
            profiles_parsed: 0,
            profiles_failed: 0,
            records_added: 0,
            duplicates: 0,
            stop: StopReason::EndOfResults,
        }
    }
}

/// Paginates through the listings of one target
pub struct CrawlDriver {
    client: Client,
    base_url: Url,
    target: CrawlTarget,
    accumulator: SharedAccumulator,
}

impl CrawlDriver {
    pub fn new(
        client: Client,
        base_url: Url,
        target: CrawlTarget,
        accumulator: SharedAccumulator,
    ) -> Self {
        Self {
            client,
            base_url,
            target,
            accumulator,
        }
    }

    /// Runs the pagination loop to completion
    ///
    /// Never fails: listing errors end the loop and profile errors skip the
    /// profile, and both are visible in the returned report.
    pub async fn run(self) -> DriverReport {
        let mut report = DriverReport::new(self.target.clone());
        let mut state = DriverState::start();

        loop {
            tracing::trace!("{}: {}", self.target, state);

            state = match state {
                DriverState::FetchingPage(page) => self.fetch_listing(page, &mut report).await,
                DriverState::FetchingProfiles { page, links } => {
                    self.fetch_profiles(page, &links, &mut report).await;
                    DriverState::after_batch(page)
                }
                DriverState::Done(reason) => {
                    report.stop = reason;
                    break;
                }
            };
        }

        tracing::debug!(
            "Finished {} after {} pages ({}): {} added, {} failed",
            self.target,
            report.pages_fetched,
            report.stop,
            report.records_added,
            report.profiles_failed
        );

        report
    }

    /// Fetches and parses one listing page, returning the next state
    async fn fetch_listing(&self, page: u32, report: &mut DriverReport) -> DriverState {
        let url = self.target.page(page).url(self.base_url.as_str());
        tracing::debug!("Fetching listing page {}", url);

        let html = match fetch_page(&self.client, &url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(
                    "Error fetching page {} for {}, giving up on this target: {}",
                    page,
                    self.target,
                    e
                );
                return DriverState::after_listing_error();
            }
        };
        report.pages_fetched += 1;

        let listing = parse_listing(&html);
        if !listing.has_profiles {
            tracing::info!(
                "No more profiles found for {}. Moving to next category/place.",
                url
            );
        }

        DriverState::after_listing(page, listing.has_profiles, listing.links)
    }

    /// Fetches all profiles of one listing page as a single batch
    async fn fetch_profiles(&self, page: u32, links: &[ProfileLink], report: &mut DriverReport) {
        let results = join_all(links.iter().map(|link| self.fetch_profile(link))).await;

        let mut records = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(record) => {
                    report.profiles_parsed += 1;
                    records.push(record);
                }
                Err(e) => {
                    report.profiles_failed += 1;
                    tracing::warn!("Skipping profile: {}", e);
                }
            }
        }

        let outcome = self.accumulator.commit(records);
        report.records_added += outcome.added as u64;
        report.duplicates += outcome.duplicates as u64;

        tracing::info!(
            "Scraped page {} for {}. Total unique profiles scraped so far: {}",
            page,
            self.target,
            outcome.total
        );
    }

    async fn fetch_profile(&self, link: &ProfileLink) -> Result<ProfileRecord, CrawlError> {
        let url = link.resolve(&self.base_url)?;
        let html = fetch_page(&self.client, url.as_str()).await?;

        parse_profile(&html).map_err(|source| CrawlError::ProfileParse {
            url: url.to_string(),
            source,
        })
    }
}
