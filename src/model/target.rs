//! Crawl targets and the URLs derived from them

use std::fmt;
use url::Url;

/// A directory location: the slug used in listing URLs and its numeric ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Place {
    pub name: String,
    pub id: u32,
}

impl Place {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// A grade-band segment of the listing taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One (place, category) pair; the unit of work of a crawl driver
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrawlTarget {
    pub place: Place,
    pub category: Category,
}

impl CrawlTarget {
    pub fn new(place: Place, category: Category) -> Self {
        Self { place, category }
    }

    /// Returns the request for the given listing page of this target
    pub fn page(&self, page: u32) -> PageRequest<'_> {
        PageRequest { target: self, page }
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.category, self.place.name)
    }
}

/// A listing page of one target
///
/// Page 1 is addressed by its descriptive path; later pages only by the
/// place ID and a `page` query parameter. The site expects exactly this
/// asymmetry.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub target: &'a CrawlTarget,
    pub page: u32,
}

impl PageRequest<'_> {
    /// Builds the absolute listing URL below `base_url`
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let place = &self.target.place;

        if self.page <= 1 {
            format!(
                "{}/list/{}/1/{}-{}",
                base, place.id, self.target.category, place.name
            )
        } else {
            format!("{}/list/{}/1?page={}", base, place.id, self.page)
        }
    }
}

/// Relative path of a single profile page, as found on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileLink(String);

impl ProfileLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the link below `base_url`
    ///
    /// Relative links are appended to the base URL as-is, path included, so
    /// profiles live under the same prefix as the listing pages. Absolute
    /// links are returned unchanged.
    pub fn resolve(&self, base_url: &Url) -> Result<Url, url::ParseError> {
        match Url::parse(&self.0) {
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = base_url.as_str().trim_end_matches('/');
                let separator = if self.0.starts_with('/') { "" } else { "/" };
                Url::parse(&format!("{}{}{}", base, separator, self.0))
            }
            parsed => parsed,
        }
    }
}

impl fmt::Display for ProfileLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
