use crate::config::types::{Config, CrawlerConfig, OutputConfig, PlaceEntry, SiteConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_places(&config.places)?;
    validate_categories(&config.categories)?;
    Ok(())
}

/// Validates target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must not carry a query or fragment, got '{}'",
            config.base_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.checkpoint_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "checkpoint-interval must be >= 1, got {}",
            config.checkpoint_interval
        )));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates place entries
fn validate_places(places: &[PlaceEntry]) -> Result<(), ConfigError> {
    if places.is_empty() {
        return Err(ConfigError::Validation(
            "at least one place must be configured".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for place in places {
        validate_path_segment("place name", &place.name)?;

        if !names.insert(place.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate place '{}'",
                place.name
            )));
        }
    }

    Ok(())
}

/// Validates grade categories
fn validate_categories(categories: &[String]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in categories {
        validate_path_segment("category", category)?;

        if !seen.insert(category.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category '{}'",
                category
            )));
        }
    }

    Ok(())
}

/// Checks that a value can be embedded in a listing URL path as-is
fn validate_path_segment(kind: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", kind)));
    }

    if value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
    {
        return Err(ConfigError::Validation(format!(
            "{} must be a single URL path segment, got '{}'",
            kind, value
        )));
    }

    Ok(())
}
