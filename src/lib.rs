//! Merocrawl: a tutor directory harvester
//!
//! This crate walks the paginated listings of a tutor directory for every
//! configured place and grade category, scrapes each linked profile page and
//! writes the deduplicated records to a CSV file.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse profile {url}: {source}")]
    ProfileParse {
        url: String,
        source: crawler::ProfileParseError,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl CrawlError {
    /// Returns the URL the error relates to, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Http { url, .. }
            | Self::Timeout { url }
            | Self::HttpStatus { url, .. }
            | Self::ProfileParse { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{Category, CrawlTarget, PageRequest, Place, ProfileRecord};
pub use state::{DriverState, StopReason};
