use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and validates a merocrawl configuration file
///
/// Every section is optional and falls back to the built-in defaults, so a
/// file that only narrows the crawl is enough:
///
/// ```toml
/// categories = ["all-subjects-teachers-grade-9-to-10"]
///
/// [crawler]
/// checkpoint-interval = 50
///
/// [output]
/// csv-path = "pokhara_tutors.csv"
///
/// [[places]]
/// name = "pokhara"
/// id = 4
/// ```
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid TOML, or does not pass
/// [`validate`].
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be matched to the settings they used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
