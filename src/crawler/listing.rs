//! Listing page parser
//!
//! A listing page enumerates the profiles of one place and category. This
//! module answers two questions about such a page:
//! - does it contain any profile at all (the pagination stop signal)
//! - which profile pages does it link to

use crate::model::ProfileLink;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Substring identifying an href as a profile page
pub const PROFILE_PATH_MARKER: &str = "/users/";

/// Selector of the "view profile" anchors rendered for every listed tutor
const VIEW_PROFILE_SELECTOR: &str = "a.view_profile_block[href]";

/// A parsed listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Whether the page shows at least one "view profile" link
    pub has_profiles: bool,

    /// Profile links in order of first appearance
    pub links: Vec<ProfileLink>,
}

/// Parses a listing page once and answers both questions about it
pub fn parse_listing(html: &str) -> Listing {
    let document = Html::parse_document(html);

    Listing {
        has_profiles: document_has_profiles(&document),
        links: document_profile_links(&document),
    }
}

/// Returns true if the document contains at least one "view profile" link
///
/// # Example
///
/// ```
/// use merocrawl::crawler::has_profiles;
///
/// let html = r#"<a class="view_profile_block" href="/users/ram">View</a>"#;
/// assert!(has_profiles(html));
/// assert!(!has_profiles("<p>No tutors found</p>"));
/// ```
pub fn has_profiles(html: &str) -> bool {
    document_has_profiles(&Html::parse_document(html))
}

/// Extracts the profile links of a listing page
///
/// Every `<a href>` is scanned in document order and kept when its target
/// contains [`PROFILE_PATH_MARKER`]. A link repeated later on the same page
/// is dropped, so the result holds each profile once, in order of first
/// appearance. Deduplication is per page only.
pub fn extract_profile_links(html: &str) -> Vec<ProfileLink> {
    document_profile_links(&Html::parse_document(html))
}

fn document_has_profiles(document: &Html) -> bool {
    match Selector::parse(VIEW_PROFILE_SELECTOR) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

fn document_profile_links(document: &Html) -> Vec<ProfileLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if href.contains(PROFILE_PATH_MARKER) && seen.insert(href) {
                links.push(ProfileLink::new(href));
            }
        }
    }

    links
}
