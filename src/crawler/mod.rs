//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - Listing and profile page parsing
//! - Email de-obfuscation
//! - Per-target pagination (the crawl driver)
//! - Overall crawl coordination

mod coordinator;
mod driver;
mod email;
mod fetcher;
mod listing;
mod profile;

pub use coordinator::{run_crawl, Coordinator};
pub use driver::{CrawlDriver, DriverReport};
pub use email::{decode_cf_email, EmailDecodeError};
pub use fetcher::{build_http_client, fetch_page};
pub use listing::{
    extract_profile_links, has_profiles, parse_listing, Listing, PROFILE_PATH_MARKER,
};
pub use profile::{parse_profile, ProfileParseError};

use crate::config::Config;
use crate::output::RunSummary;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and the shared accumulator
/// 2. Start one driver per place and category
/// 3. Checkpoint the accumulator as it grows
/// 4. Write the final output once every driver is done
pub async fn crawl(config: Config) -> Result<RunSummary, CrawlError> {
    run_crawl(config).await
}
