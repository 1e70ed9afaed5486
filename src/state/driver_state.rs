//! Pagination state of a single crawl driver
//!
//! A driver starts at `FetchingPage(1)`, alternates between fetching a
//! listing page and fetching the profiles it links to, and stops for good
//! once it reaches `Done`.

use crate::model::ProfileLink;
use std::fmt;

/// Why a driver stopped paginating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// A listing page contained no profile link
    EndOfResults,

    /// A listing page could not be fetched or read
    ///
    /// Terminal as well: the target is not retried, so a transient failure
    /// ends the crawl of this place and category.
    ListingFailed,
}

impl StopReason {
    /// Returns true if the driver stopped because of an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ListingFailed)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EndOfResults => "end of results",
            Self::ListingFailed => "listing failed",
        };
        write!(f, "{}", s)
    }
}

/// Represents where a driver is in its pagination loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverState {
    /// The listing page with this number is next to be fetched
    FetchingPage(u32),

    /// The profiles linked from `page` are next to be fetched, as one batch
    FetchingProfiles { page: u32, links: Vec<ProfileLink> },

    /// Pagination finished
    Done(StopReason),
}

impl DriverState {
    /// The state every driver starts in
    pub fn start() -> Self {
        Self::FetchingPage(1)
    }

    /// Next state after listing page `page` was fetched and parsed
    ///
    /// A page without any "view profile" link ends the crawl of the target.
    /// A page that has one moves on to its profile batch, even when no link
    /// matched the profile path, in which case the batch is empty.
    pub fn after_listing(page: u32, has_profiles: bool, links: Vec<ProfileLink>) -> Self {
        if has_profiles {
            Self::FetchingProfiles { page, links }
        } else {
            Self::Done(StopReason::EndOfResults)
        }
    }

    /// Next state after the listing page could not be fetched
    pub fn after_listing_error() -> Self {
        Self::Done(StopReason::ListingFailed)
    }

    /// Next state after the profile batch of `page` completed
    pub fn after_batch(page: u32) -> Self {
        Self::FetchingPage(page + 1)
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchingPage(page) => write!(f, "fetching page {}", page),
            Self::FetchingProfiles { page, links } => {
                write!(f, "fetching {} profiles of page {}", links.len(), page)
            }
            Self::Done(reason) => write!(f, "done ({})", reason),
        }
    }
}
