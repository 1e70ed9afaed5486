//! Configuration module for merocrawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A crawl can also run without a file, in which case [`Config::default`]
//! supplies the directory's places and grade categories.
//!
//! # Example
//!
//! ```no_run
//! use merocrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("merocrawl.toml")).unwrap();
//! println!("Crawling {} places", config.places.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, PlaceEntry, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

use crate::model::{Category, CrawlTarget, Place};

impl Config {
    /// Returns the configured places in file order
    pub fn place_list(&self) -> Vec<Place> {
        self.places
            .iter()
            .map(|p| Place::new(p.name.clone(), p.id))
            .collect()
    }

    /// Returns the configured categories in file order
    pub fn category_list(&self) -> Vec<Category> {
        self.categories.iter().cloned().map(Category::new).collect()
    }

    /// Builds the cartesian product of places and categories
    ///
    /// Targets are ordered place-major, matching the order of the
    /// configuration.
    pub fn targets(&self) -> Vec<CrawlTarget> {
        let categories = self.category_list();
        self.place_list()
            .into_iter()
            .flat_map(|place| {
                categories
                    .iter()
                    .map(move |category| CrawlTarget::new(place.clone(), category.clone()))
            })
            .collect()
    }
}
